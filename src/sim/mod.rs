//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Variable timestep supplied by the caller
//! - Seeded RNG only (obstacle gaps)
//! - Stable iteration order (obstacle arrival order)

pub mod actor;
pub mod collision;
pub mod obstacle;
pub mod profile;
pub mod state;
pub mod tick;

pub use actor::Actor;
pub use collision::{GapColumn, circle_hits_column, circle_out_of_bounds};
pub use obstacle::{Obstacle, ObstacleStream, gap_top_range};
pub use profile::{DEFAULT_PROFILE, DifficultyProfile, PROFILES};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{Command, apply_command, flap, select_difficulty, tick, toggle_ranking};
