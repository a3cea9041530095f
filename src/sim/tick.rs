//! Variable-timestep simulation tick and player commands
//!
//! `tick` advances a running session by one frame; `apply_command` routes a
//! player input according to the current phase.

use super::collision::{GapColumn, circle_hits_column, circle_out_of_bounds};
use super::profile::DifficultyProfile;
use super::state::{GameEvent, GamePhase, GameState};

/// A single player intent, already resolved from raw pointer/keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start from Ready/GameOver, or flap while running
    Flap,
    /// Choose a difficulty profile (Ready only)
    SelectDifficulty(usize),
    /// Show/hide the friends ranking panel (Ready only)
    ToggleRanking,
}

/// Apply a command to the session
///
/// Returns `false` when the command was rejected in the current phase.
pub fn apply_command(state: &mut GameState, command: Command) -> bool {
    match command {
        Command::Flap => {
            flap(state);
            true
        }
        Command::SelectDifficulty(index) => select_difficulty(state, index),
        Command::ToggleRanking => toggle_ranking(state),
    }
}

/// Start a run from Ready/GameOver, or set the actor's velocity while running
pub fn flap(state: &mut GameState) {
    match state.phase {
        GamePhase::Ready | GamePhase::GameOver => state.start(),
        GamePhase::Running => {
            state.actor.impulse(state.profile.flap_impulse);
            state.push_event(GameEvent::Flapped);
        }
    }
}

/// Select a difficulty profile; invalid indices select the first profile
pub fn select_difficulty(state: &mut GameState, index: usize) -> bool {
    if state.phase != GamePhase::Ready {
        log::debug!("Difficulty change ignored in {:?}", state.phase);
        return false;
    }
    let (index, profile) = DifficultyProfile::get(index);
    state.profile_index = index;
    state.profile = profile;
    log::info!("Difficulty set to {}", profile.label);
    state.push_event(GameEvent::DifficultyChanged { index });
    true
}

/// Toggle the ranking panel; only meaningful before a run starts
pub fn toggle_ranking(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Ready {
        return false;
    }
    state.ranking_visible = !state.ranking_visible;
    state.push_event(GameEvent::RankingToggled {
        visible: state.ranking_visible,
    });
    true
}

/// Advance the session by `dt` seconds
///
/// Does nothing outside `GamePhase::Running`.
pub fn tick(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Running {
        return;
    }
    let profile = state.profile;

    state.actor.integrate(dt, profile.gravity);

    // At most one spawn per tick, however far the timer overshoots
    state.spawn_timer_ms += dt * 1000.0;
    if state.spawn_timer_ms >= profile.spawn_interval_ms {
        state.spawn_timer_ms = 0.0;
        let (width, height) = (state.playfield.x, state.playfield.y);
        state
            .obstacles
            .spawn(&mut state.rng, width, height, profile.gap_height);
    }

    state.obstacles.advance(dt, profile.speed);

    let crossed = state.obstacles.score_crossings(state.actor.pos.x);
    state.add_score(crossed);

    state.obstacles.retire();

    if circle_out_of_bounds(state.actor.pos, state.actor.radius, state.playfield.y) {
        state.enter_game_over();
        return;
    }

    let hit = state.obstacles.iter().any(|obstacle| {
        let column = GapColumn::from_obstacle(obstacle, profile.gap_height);
        circle_hits_column(state.actor.pos, state.actor.radius, &column)
    });
    if hit {
        state.enter_game_over();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::gap_top_range;

    fn running() -> GameState {
        let mut state = GameState::new(12345, 360.0, 640.0);
        flap(&mut state);
        state.drain_events();
        state
    }

    #[test]
    fn test_flap_from_ready_starts_without_impulse() {
        let mut state = GameState::new(12345, 360.0, 640.0);
        flap(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.actor.velocity, 0.0);
        assert_eq!(state.drain_events(), vec![GameEvent::Started { profile: 1 }]);
    }

    #[test]
    fn test_flap_while_running_sets_velocity() {
        let mut state = running();
        state.actor.velocity = 500.0;
        flap(&mut state);
        assert_eq!(state.actor.velocity, -260.0);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_flap_from_game_over_restarts() {
        let mut state = running();
        state.actor.velocity = 500.0;
        state.enter_game_over();
        flap(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.actor.velocity, 0.0);
        assert_eq!(state.actor.pos.y, 320.0);
    }

    #[test]
    fn test_tick_ignored_outside_running() {
        let mut state = GameState::new(12345, 360.0, 640.0);
        tick(&mut state, 0.5);
        assert_eq!(state.actor.pos.y, 320.0);
        assert_eq!(state.spawn_timer_ms, 0.0);
    }

    #[test]
    fn test_spawn_once_per_tick_even_on_overflow() {
        let mut state = running();
        // Freeze the actor and the scroll while we overshoot the timer
        state.profile.gravity = 0.0;
        state.profile.speed = 0.0;
        tick(&mut state, 5.0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.spawn_timer_ms, 0.0);
    }

    #[test]
    fn test_spawn_after_interval() {
        let mut state = running();
        state.profile.gravity = 0.0;
        tick(&mut state, 1.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.spawn_timer_ms, 1000.0);
        tick(&mut state, 0.5);
        assert_eq!(state.obstacles.len(), 1);
        // Spawned at 414 then advanced by 90 in the same tick
        let obstacle = state.obstacles.iter().next().unwrap();
        assert_eq!(obstacle.x, 324.0);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let mut state = running();
        state.profile.gravity = 0.0;
        // Trailing edge moves from 94 to 85, passing the actor at x=90
        state.obstacles.push(40.0, 240.0);
        tick(&mut state, 0.05);
        assert_eq!(state.score, 1);
        assert_eq!(state.best, 1);
        tick(&mut state, 0.05);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_ground_hit_ends_run_once() {
        let mut state = running();
        state.actor.pos.y = 625.0;
        state.profile.gravity = 0.0;
        tick(&mut state, 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        for _ in 0..10 {
            tick(&mut state, 0.016);
        }
        let overs = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_ceiling_hit_ends_run() {
        let mut state = running();
        state.actor.pos.y = 10.0;
        tick(&mut state, 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_obstacle_collision_ends_run() {
        let mut state = running();
        state.profile.gravity = 0.0;
        // Actor at (90, 320), column 80..134 with gap 100..260
        state.obstacles.push(80.0, 100.0);
        tick(&mut state, 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_actor_inside_gap_survives() {
        let mut state = GameState::new(12345, 640.0, 640.0);
        flap(&mut state);
        state.profile.gravity = 0.0;
        state.actor.pos = glam::Vec2::new(160.0, 330.0);
        state.obstacles.push(100.0, 200.0);
        tick(&mut state, 0.0);
        assert_eq!(state.phase, GamePhase::Running);
        state.actor.pos.y = 520.0;
        tick(&mut state, 0.0);
        // Bottom 536 is below the gap (360): obstacle hit, not ground
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_difficulty_only_in_ready() {
        let mut state = GameState::new(12345, 360.0, 640.0);
        assert!(select_difficulty(&mut state, 2));
        assert_eq!(state.profile.label, "Hard");
        assert_eq!(state.profile_index, 2);

        flap(&mut state);
        assert_eq!(state.profile.label, "Hard");
        assert!(!select_difficulty(&mut state, 0));
        assert_eq!(state.profile.label, "Hard");

        state.enter_game_over();
        assert!(!select_difficulty(&mut state, 0));
    }

    #[test]
    fn test_selected_profile_drives_next_run() {
        let mut state = GameState::new(12345, 360.0, 640.0);
        assert!(select_difficulty(&mut state, 2));
        flap(&mut state);
        state.profile.gravity = 0.0;

        // Hard spawns every 1200 ms; Normal would not have spawned yet
        tick(&mut state, 1.25);
        assert_eq!(state.obstacles.len(), 1);
        let obstacle = state.obstacles.iter().next().unwrap().clone();
        let (lo, hi) = gap_top_range(640.0, 130.0).unwrap();
        assert_eq!((lo, hi), (80, 470));
        assert!(obstacle.gap_top >= lo as f32 && obstacle.gap_top <= hi as f32);
        // Spawned at 414, scrolled by 220 * 1.25
        assert_eq!(obstacle.x, 139.0);

        tick(&mut state, 0.125);
        let moved_x = state.obstacles.iter().next().unwrap().x;
        assert_eq!(moved_x, 139.0 - 220.0 * 0.125);
        assert_eq!(state.phase, GamePhase::Running);

        // Hard's narrower gap is what the collision test sees
        state.actor.pos.y = obstacle.gap_top + 130.0 - 10.0;
        state.actor.pos.x = moved_x + 10.0;
        tick(&mut state, 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_invalid_difficulty_selects_first() {
        let mut state = GameState::new(12345, 360.0, 640.0);
        assert!(select_difficulty(&mut state, 42));
        assert_eq!(state.profile_index, 0);
        assert_eq!(state.profile.label, "Easy");
    }

    #[test]
    fn test_ranking_toggle_ready_only() {
        let mut state = GameState::new(12345, 360.0, 640.0);
        assert!(apply_command(&mut state, Command::ToggleRanking));
        assert!(state.ranking_visible);
        flap(&mut state);
        assert!(!state.ranking_visible);
        assert!(!apply_command(&mut state, Command::ToggleRanking));
        assert!(!state.ranking_visible);
    }
}
