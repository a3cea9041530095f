//! Game session state
//!
//! One `GameState` lives for the whole program. It owns the actor, the
//! obstacle stream and the score, and is the only thing the frame loop and
//! input handlers mutate.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::Actor;
use super::obstacle::ObstacleStream;
use super::profile::{DEFAULT_PROFILE, DifficultyProfile};
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Waiting for the first flap; difficulty and ranking panel can be changed
    #[default]
    Ready,
    /// Simulation active
    Running,
    /// Simulation frozen until the next flap
    GameOver,
}

/// Things that happened during a tick or command, drained by the frame loop
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A new run began with the given profile
    Started { profile: usize },
    Flapped,
    Scored { score: u32, best: u32 },
    /// Emitted once on entry to `GamePhase::GameOver`
    GameOver { score: u32, best: u32 },
    DifficultyChanged { index: usize },
    RankingToggled { visible: bool },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u32,
    /// Highest score seen this process; never decreases
    pub best: u32,
    /// Elapsed milliseconds toward the next spawn
    pub spawn_timer_ms: f32,
    /// Friends ranking panel shown (Ready only)
    pub ranking_visible: bool,
    pub actor: Actor,
    pub obstacles: ObstacleStream,
    /// Selected profile index into `PROFILES`
    pub profile_index: usize,
    /// Constants in effect for resets and ticks
    pub profile: DifficultyProfile,
    /// Playfield size in logical units
    pub playfield: Vec2,
    pub rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session in the Ready phase with the default profile
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        let playfield = Vec2::new(width, height);
        Self {
            phase: GamePhase::Ready,
            score: 0,
            best: 0,
            spawn_timer_ms: 0.0,
            ranking_visible: false,
            actor: Actor::new(Self::actor_home(playfield)),
            obstacles: ObstacleStream::new(OBSTACLE_WIDTH),
            profile_index: DEFAULT_PROFILE,
            profile: DifficultyProfile::default(),
            playfield,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Where the actor sits at the start of a run
    pub fn actor_home(playfield: Vec2) -> Vec2 {
        Vec2::new(
            playfield.x * ACTOR_X_FRACTION,
            playfield.y * ACTOR_Y_FRACTION,
        )
    }

    /// Change the playfield size; the actor is only re-placed outside a run
    pub fn set_playfield(&mut self, width: f32, height: f32) {
        self.playfield = Vec2::new(width, height);
        if self.phase == GamePhase::Ready {
            self.actor = Actor::new(Self::actor_home(self.playfield));
        }
    }

    /// Clear the run: actor home, no obstacles, zero score and spawn timer
    pub fn reset(&mut self) {
        self.score = 0;
        self.spawn_timer_ms = 0.0;
        self.ranking_visible = false;
        self.obstacles.clear();
        self.actor = Actor::new(Self::actor_home(self.playfield));
        self.profile = DifficultyProfile::get(self.profile_index).1;
    }

    /// Reset and enter Running
    pub fn start(&mut self) {
        self.reset();
        self.phase = GamePhase::Running;
        log::info!("Run started ({})", self.profile.label);
        self.push_event(GameEvent::Started {
            profile: self.profile_index,
        });
    }

    /// On-enter action for GameOver
    ///
    /// This is the only way into `GamePhase::GameOver`; it does nothing unless
    /// the session is running, so the `GameOver` event fires once per entry.
    pub fn enter_game_over(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::GameOver;
        log::info!("Game over: score {}, best {}", self.score, self.best);
        self.push_event(GameEvent::GameOver {
            score: self.score,
            best: self.best,
        });
    }

    /// Award points, keeping `best` in step
    pub fn add_score(&mut self, points: u32) {
        for _ in 0..points {
            self.score += 1;
            self.best = self.best.max(self.score);
            self.push_event(GameEvent::Scored {
                score: self.score,
                best: self.best,
            });
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
