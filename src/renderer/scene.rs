//! Per-frame scene generation
//!
//! Turns the session state into a display list. This is the only input the
//! drawing backend needs.

use glam::Vec2;

use super::draw::{DrawCmd, TextAlign, colors};
use crate::Rect;
use crate::consts::GROUND_HEIGHT;
use crate::sim::{GamePhase, GameState, PROFILES};
use crate::ui::Layout;

pub const HINT_READY: &str = "Tap to start and help the bird fly!";
pub const HINT_GAME_OVER: &str = "Game over, tap to retry";

/// Eye dot offset from the actor center, and its radius
const EYE_OFFSET: Vec2 = Vec2::new(6.0, -4.0);
const EYE_RADIUS: f32 = 3.0;

/// Build the full display list for one frame
pub fn build(state: &GameState, layout: &Layout) -> Vec<DrawCmd> {
    let (width, height) = (state.playfield.x, state.playfield.y);
    let mut cmds = Vec::with_capacity(16 + state.obstacles.len() * 2);

    cmds.push(DrawCmd::FillRect {
        rect: Rect::new(0.0, 0.0, width, height),
        color: colors::SKY,
    });
    obstacles(state, &mut cmds);
    cmds.push(DrawCmd::FillRect {
        rect: Rect::new(0.0, height - GROUND_HEIGHT, width, GROUND_HEIGHT),
        color: colors::GROUND,
    });
    actor(state, &mut cmds);
    score(state, &mut cmds);

    if let Some(hint) = hint(state.phase) {
        cmds.push(DrawCmd::text(
            hint,
            Vec2::new(width / 2.0, height / 2.0),
            20.0,
            colors::TEXT,
            TextAlign::Center,
        ));
    }

    if state.phase == GamePhase::Ready {
        difficulty_selector(state, layout, &mut cmds);
        button(
            &mut cmds,
            layout.ranking_toggle,
            if state.ranking_visible { "Close" } else { "Ranking" },
            state.ranking_visible,
        );
        if state.ranking_visible {
            cmds.push(DrawCmd::LeaderboardPanel {
                rect: layout.ranking_panel,
            });
        }
    }
    cmds
}

/// Hint text for a phase
pub fn hint(phase: GamePhase) -> Option<&'static str> {
    match phase {
        GamePhase::Ready => Some(HINT_READY),
        GamePhase::GameOver => Some(HINT_GAME_OVER),
        GamePhase::Running => None,
    }
}

fn obstacles(state: &GameState, cmds: &mut Vec<DrawCmd>) {
    let gap = state.profile.gap_height;
    let floor = state.playfield.y - GROUND_HEIGHT;
    for obstacle in state.obstacles.iter() {
        let gap_bottom = obstacle.gap_top + gap;
        cmds.push(DrawCmd::FillRect {
            rect: Rect::new(obstacle.x, 0.0, obstacle.width, obstacle.gap_top),
            color: colors::OBSTACLE,
        });
        cmds.push(DrawCmd::FillRect {
            rect: Rect::new(
                obstacle.x,
                gap_bottom,
                obstacle.width,
                (floor - gap_bottom).max(0.0),
            ),
            color: colors::OBSTACLE,
        });
    }
}

fn actor(state: &GameState, cmds: &mut Vec<DrawCmd>) {
    let actor = &state.actor;
    cmds.push(DrawCmd::FillCircle {
        center: actor.pos,
        radius: actor.radius,
        color: colors::ACTOR,
    });
    cmds.push(DrawCmd::FillCircle {
        center: actor.pos + EYE_OFFSET,
        radius: EYE_RADIUS,
        color: colors::ACTOR_EYE,
    });
}

fn score(state: &GameState, cmds: &mut Vec<DrawCmd>) {
    cmds.push(DrawCmd::text(
        format!("Score: {}", state.score),
        Vec2::new(16.0, 36.0),
        24.0,
        colors::TEXT,
        TextAlign::Left,
    ));
    cmds.push(DrawCmd::text(
        format!("Best: {}", state.best),
        Vec2::new(16.0, 60.0),
        16.0,
        colors::TEXT,
        TextAlign::Left,
    ));
}

fn difficulty_selector(state: &GameState, layout: &Layout, cmds: &mut Vec<DrawCmd>) {
    for (i, (rect, profile)) in layout.difficulty_buttons.iter().zip(PROFILES.iter()).enumerate() {
        button(cmds, *rect, profile.label, i == state.profile_index);
    }
}

fn button(cmds: &mut Vec<DrawCmd>, rect: Rect, label: &str, active: bool) {
    cmds.push(DrawCmd::FillRect {
        rect,
        color: if active {
            colors::BUTTON_ACTIVE
        } else {
            colors::BUTTON
        },
    });
    cmds.push(DrawCmd::text(
        label,
        Vec2::new(rect.x + rect.w / 2.0, rect.y + rect.h / 2.0 + 6.0),
        16.0,
        colors::TEXT,
        TextAlign::Center,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{flap, select_difficulty};

    fn setup() -> (GameState, Layout) {
        (GameState::new(3, 360.0, 640.0), Layout::new(360.0, 640.0))
    }

    fn texts(cmds: &[DrawCmd]) -> Vec<&str> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_ready_scene() {
        let (state, layout) = setup();
        let cmds = build(&state, &layout);
        let texts = texts(&cmds);
        assert!(texts.contains(&"Score: 0"));
        assert!(texts.contains(&"Best: 0"));
        assert!(texts.contains(&HINT_READY));
        assert!(texts.contains(&"Easy"));
        assert!(texts.contains(&"Ranking"));
        assert!(!cmds.iter().any(|c| matches!(c, DrawCmd::LeaderboardPanel { .. })));
    }

    #[test]
    fn test_running_scene_has_no_widgets() {
        let (mut state, layout) = setup();
        flap(&mut state);
        let cmds = build(&state, &layout);
        let texts = texts(&cmds);
        assert_eq!(texts, vec!["Score: 0", "Best: 0"]);
    }

    #[test]
    fn test_actor_and_eye() {
        let (state, layout) = setup();
        let cmds = build(&state, &layout);
        let circles: Vec<(Vec2, f32)> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::FillCircle { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect();
        assert_eq!(
            circles,
            vec![(Vec2::new(90.0, 320.0), 16.0), (Vec2::new(96.0, 316.0), 3.0)]
        );
    }

    #[test]
    fn test_obstacle_rects() {
        let (mut state, layout) = setup();
        state.obstacles.push(100.0, 200.0);
        // Lowest possible gap: bottom pipe collapses instead of going negative
        state.obstacles.push(200.0, 440.0);
        let cmds = build(&state, &layout);
        let pipes: Vec<Rect> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::FillRect { rect, color } if *color == colors::OBSTACLE => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(
            pipes,
            vec![
                Rect::new(100.0, 0.0, 54.0, 200.0),
                Rect::new(100.0, 360.0, 54.0, 200.0),
                Rect::new(200.0, 0.0, 54.0, 440.0),
                Rect::new(200.0, 600.0, 54.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_selected_difficulty_highlighted() {
        let (mut state, layout) = setup();
        select_difficulty(&mut state, 2);
        let cmds = build(&state, &layout);
        let hard = layout.difficulty_buttons[2];
        assert!(cmds.contains(&DrawCmd::FillRect {
            rect: hard,
            color: colors::BUTTON_ACTIVE
        }));
    }

    #[test]
    fn test_panel_composited_when_visible() {
        let (mut state, layout) = setup();
        state.ranking_visible = true;
        let cmds = build(&state, &layout);
        assert_eq!(
            cmds.last(),
            Some(&DrawCmd::LeaderboardPanel {
                rect: layout.ranking_panel
            })
        );
    }

    #[test]
    fn test_game_over_hint() {
        assert_eq!(hint(GamePhase::GameOver), Some(HINT_GAME_OVER));
        assert_eq!(hint(GamePhase::Running), None);
    }
}
