//! Obstacle stream: spawning, scrolling, scoring and retiring pipe pairs
//!
//! Obstacles live in a `Vec` in arrival order. New obstacles enter fully
//! off-screen on the right and scroll left until their trailing edge is
//! more than `RETIRE_MARGIN` past the left edge of the playfield.

use rand::Rng;

use crate::consts::{GAP_MIN_TOP_OFFSET, GAP_PADDING, RETIRE_MARGIN};

/// A pipe pair with a passable gap
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Leading (left) edge, decreases over time
    pub x: f32,
    pub width: f32,
    /// Height of the top solid region, fixed at spawn
    pub gap_top: f32,
    /// Set once the actor has cleared this obstacle; never reset
    pub passed: bool,
}

impl Obstacle {
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }
}

/// Inclusive integer range of valid gap-top heights, or `None` if the gap cannot fit
pub fn gap_top_range(playfield_height: f32, gap_height: f32) -> Option<(i32, i32)> {
    let min_top = (GAP_PADDING + GAP_MIN_TOP_OFFSET) as i32;
    let max_top = (playfield_height - gap_height - GAP_PADDING).floor() as i32;
    (min_top <= max_top).then_some((min_top, max_top))
}

/// Ordered collection of live obstacles
#[derive(Debug, Clone, Default)]
pub struct ObstacleStream {
    obstacles: Vec<Obstacle>,
    width: f32,
}

impl ObstacleStream {
    pub fn new(width: f32) -> Self {
        Self {
            obstacles: Vec::new(),
            width,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Push an obstacle directly (used by the session for scripted setups)
    pub fn push(&mut self, x: f32, gap_top: f32) {
        self.obstacles.push(Obstacle {
            x,
            width: self.width,
            gap_top,
            passed: false,
        });
    }

    /// Spawn a new obstacle just past the right edge of the playfield
    ///
    /// The gap top is drawn uniformly from the inclusive integer range given
    /// by [`gap_top_range`]. If the gap does not fit, the gap top is clamped
    /// to the lowest valid position.
    pub fn spawn<R: Rng>(
        &mut self,
        rng: &mut R,
        playfield_width: f32,
        playfield_height: f32,
        gap_height: f32,
    ) -> f32 {
        let gap_top = match gap_top_range(playfield_height, gap_height) {
            Some((min_top, max_top)) => rng.random_range(min_top..=max_top) as f32,
            None => {
                log::warn!(
                    "Gap {} does not fit playfield height {}, clamping",
                    gap_height,
                    playfield_height
                );
                GAP_PADDING + GAP_MIN_TOP_OFFSET
            }
        };
        self.push(playfield_width + self.width, gap_top);
        gap_top
    }

    /// Scroll every obstacle left by `speed * dt`
    pub fn advance(&mut self, dt: f32, speed: f32) {
        let dx = speed * dt;
        for obstacle in &mut self.obstacles {
            obstacle.x -= dx;
        }
    }

    /// Drop obstacles whose trailing edge is more than `RETIRE_MARGIN` off-screen
    pub fn retire(&mut self) {
        self.obstacles.retain(|o| o.trailing_edge() >= -RETIRE_MARGIN);
    }

    /// Mark newly cleared obstacles as passed, returning how many were cleared
    pub fn score_crossings(&mut self, actor_x: f32) -> u32 {
        let mut crossed = 0;
        for obstacle in self.obstacles.iter_mut().filter(|o| !o.passed) {
            if obstacle.trailing_edge() < actor_x {
                obstacle.passed = true;
                crossed += 1;
            }
        }
        crossed
    }
}
