//! On-canvas buttons and pointer hit-testing
//!
//! The only widgets are the ranking toggle (top-right) and one button per
//! difficulty profile (a row above the ground), both shown in Ready only.
//! Any tap that misses them is a flap.

use glam::Vec2;

use crate::Rect;
use crate::consts::GROUND_HEIGHT;
use crate::sim::{Command, GamePhase, GameState, PROFILES};

const MARGIN: f32 = 16.0;
const TOGGLE_SIZE: Vec2 = Vec2::new(88.0, 32.0);
const DIFFICULTY_HEIGHT: f32 = 40.0;
const DIFFICULTY_GAP: f32 = 8.0;
const PANEL_TOP: f32 = 96.0;
/// Title band plus ten 32px rows
const PANEL_MAX_HEIGHT: f32 = 40.0 + 10.0 * 32.0 + 8.0;

/// Widget rectangles for a playfield size
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub ranking_toggle: Rect,
    pub difficulty_buttons: Vec<Rect>,
    pub ranking_panel: Rect,
}

impl Layout {
    pub fn new(width: f32, height: f32) -> Self {
        let ranking_toggle = Rect::new(
            width - MARGIN - TOGGLE_SIZE.x,
            MARGIN,
            TOGGLE_SIZE.x,
            TOGGLE_SIZE.y,
        );

        let count = PROFILES.len() as f32;
        let button_w = ((width - 2.0 * MARGIN - (count - 1.0) * DIFFICULTY_GAP) / count).max(0.0);
        let row_y = height - GROUND_HEIGHT - DIFFICULTY_HEIGHT - MARGIN;
        let difficulty_buttons = (0..PROFILES.len())
            .map(|i| {
                Rect::new(
                    MARGIN + i as f32 * (button_w + DIFFICULTY_GAP),
                    row_y,
                    button_w,
                    DIFFICULTY_HEIGHT,
                )
            })
            .collect();

        // The panel must stay clear of the difficulty row
        let panel_h = (row_y - MARGIN - PANEL_TOP).clamp(0.0, PANEL_MAX_HEIGHT);
        let ranking_panel = Rect::new(
            MARGIN + 8.0,
            PANEL_TOP,
            (width - 2.0 * (MARGIN + 8.0)).max(0.0),
            panel_h,
        );

        Self {
            ranking_toggle,
            difficulty_buttons,
            ranking_panel,
        }
    }

    /// Map a pointer-down to a command
    ///
    /// `None` means the tap was consumed without effect (a tap on the open
    /// ranking panel).
    pub fn resolve(&self, state: &GameState, pos: Option<Vec2>) -> Option<Command> {
        let Some(pos) = pos else {
            return Some(Command::Flap);
        };
        if state.phase != GamePhase::Ready {
            return Some(Command::Flap);
        }
        if self.ranking_toggle.contains(pos) {
            return Some(Command::ToggleRanking);
        }
        if state.ranking_visible {
            if self.ranking_panel.contains(pos) {
                return None;
            }
            return Some(Command::ToggleRanking);
        }
        if let Some(i) = self.difficulty_buttons.iter().position(|r| r.contains(pos)) {
            return Some(Command::SelectDifficulty(i));
        }
        Some(Command::Flap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::flap;

    fn setup() -> (Layout, GameState) {
        (Layout::new(360.0, 640.0), GameState::new(1, 360.0, 640.0))
    }

    #[test]
    fn test_layout_geometry() {
        let (layout, _) = setup();
        assert_eq!(layout.ranking_toggle, Rect::new(256.0, 16.0, 88.0, 32.0));
        assert_eq!(layout.difficulty_buttons.len(), PROFILES.len());
        let first = layout.difficulty_buttons[0];
        let last = layout.difficulty_buttons[PROFILES.len() - 1];
        assert_eq!(first.x, 16.0);
        assert!((last.right() - 344.0).abs() < 1e-3);
        assert_eq!(first.y, 640.0 - 80.0 - 40.0 - 16.0);
        assert!(layout.ranking_panel.bottom() <= first.y);
    }

    #[test]
    fn test_tap_without_position_flaps() {
        let (layout, state) = setup();
        assert_eq!(layout.resolve(&state, None), Some(Command::Flap));
    }

    #[test]
    fn test_buttons_in_ready() {
        let (layout, state) = setup();
        let toggle = Vec2::new(300.0, 30.0);
        assert_eq!(layout.resolve(&state, Some(toggle)), Some(Command::ToggleRanking));

        let hard = layout.difficulty_buttons[2];
        let center = Vec2::new(hard.x + hard.w / 2.0, hard.y + hard.h / 2.0);
        assert_eq!(
            layout.resolve(&state, Some(center)),
            Some(Command::SelectDifficulty(2))
        );

        assert_eq!(
            layout.resolve(&state, Some(Vec2::new(180.0, 300.0))),
            Some(Command::Flap)
        );
    }

    #[test]
    fn test_buttons_ignored_while_running() {
        let (layout, mut state) = setup();
        flap(&mut state);
        let toggle = Vec2::new(300.0, 30.0);
        assert_eq!(layout.resolve(&state, Some(toggle)), Some(Command::Flap));
    }

    #[test]
    fn test_open_panel_consumes_taps() {
        let (layout, mut state) = setup();
        state.ranking_visible = true;
        assert_eq!(layout.resolve(&state, Some(Vec2::new(180.0, 200.0))), None);
        // Outside the panel closes it
        assert_eq!(
            layout.resolve(&state, Some(Vec2::new(180.0, 600.0))),
            Some(Command::ToggleRanking)
        );
    }
}
