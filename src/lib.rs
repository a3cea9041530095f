//! Tap Flap - A one-button arcade game for the browser canvas
//!
//! Core modules:
//! - `sim`: Simulation (actor physics, obstacle stream, collisions, session state)
//! - `app`: Per-frame driver that ties the session to its collaborators
//! - `renderer`: Display list generation and Canvas 2D backend
//! - `leaderboard`: Isolated friends-ranking panel, fed by fire-and-forget messages
//! - `persistence`: Remote best-score store
//! - `platform`: Browser/native platform abstraction

pub mod app;
pub mod frame_clock;
pub mod leaderboard;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use app::GameLoop;
pub use frame_clock::FrameClock;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Vertical padding kept clear above and below every gap
    pub const GAP_PADDING: f32 = 40.0;
    /// Extra clearance added to the top padding for the highest possible gap
    pub const GAP_MIN_TOP_OFFSET: f32 = 40.0;

    /// Obstacle (pipe) width
    pub const OBSTACLE_WIDTH: f32 = 54.0;
    /// Obstacles are retired once their trailing edge is this far past the left edge
    pub const RETIRE_MARGIN: f32 = 10.0;

    /// Actor (bird) radius
    pub const ACTOR_RADIUS: f32 = 16.0;
    /// Actor x as a fraction of playfield width
    pub const ACTOR_X_FRACTION: f32 = 0.25;
    /// Actor rest y as a fraction of playfield height
    pub const ACTOR_Y_FRACTION: f32 = 0.5;

    /// Height of the ground band drawn along the bottom of the playfield
    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Default playfield when no host metrics are available
    pub const DEFAULT_WIDTH: f32 = 360.0;
    pub const DEFAULT_HEIGHT: f32 = 640.0;
}

/// Axis-aligned rectangle in playfield units (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open containment test used for button hit-testing
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}
