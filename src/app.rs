//! Frame driver
//!
//! `GameLoop` is the one owner of the session. The host calls `frame` once
//! per animation frame and `pointer_down`/`command` from input callbacks,
//! all on the same thread. After every mutation the session's events are
//! dispatched to the collaborators: the best-score store and the
//! leaderboard panel. Both are optional and every send is fire-and-forget.

use glam::Vec2;

use crate::frame_clock::FrameClock;
use crate::leaderboard::{LeaderboardMessage, LeaderboardSender};
use crate::persistence::{CloudStore, report_best};
use crate::platform::Viewport;
use crate::renderer::DrawCmd;
use crate::renderer::scene;
use crate::settings::Settings;
use crate::sim::{Command, GameEvent, GameState, apply_command, select_difficulty, tick};
use crate::ui::Layout;

pub struct GameLoop {
    pub state: GameState,
    pub layout: Layout,
    pub viewport: Viewport,
    pub settings: Settings,
    clock: FrameClock,
    store: Option<Box<dyn CloudStore>>,
    leaderboard: Option<LeaderboardSender>,
}

impl GameLoop {
    pub fn new(seed: u64, viewport: Viewport, settings: Settings) -> Self {
        let mut state = GameState::new(seed, viewport.width, viewport.height);
        select_difficulty(&mut state, settings.difficulty());
        // Restoring the saved choice is not a change worth reporting
        state.drain_events();
        Self {
            state,
            layout: Layout::new(viewport.width, viewport.height),
            viewport,
            clock: FrameClock::with_max_dt(settings.max_frame_dt),
            settings,
            store: None,
            leaderboard: None,
        }
    }

    /// Attach the best-score store
    pub fn with_store(mut self, store: Box<dyn CloudStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Attach the leaderboard panel and send it the initial surface size
    pub fn with_leaderboard(mut self, sender: LeaderboardSender) -> Self {
        self.leaderboard = Some(sender);
        self.post_init();
        self
    }

    /// Apply new device metrics
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.state.set_playfield(viewport.width, viewport.height);
        self.layout = Layout::new(viewport.width, viewport.height);
        self.post_init();
    }

    /// Handle a pointer-down, optionally at a playfield coordinate
    pub fn pointer_down(&mut self, pos: Option<Vec2>) -> Option<Command> {
        let command = self.layout.resolve(&self.state, pos)?;
        self.command(command);
        Some(command)
    }

    /// Apply a resolved command; `false` if the current phase rejected it
    pub fn command(&mut self, command: Command) -> bool {
        let accepted = apply_command(&mut self.state, command);
        self.dispatch();
        accepted
    }

    /// Advance one animation frame and return the scene to draw
    pub fn frame(&mut self, timestamp_ms: f64) -> Vec<DrawCmd> {
        let dt = self.clock.delta(timestamp_ms);
        tick(&mut self.state, dt);
        self.dispatch();
        scene::build(&self.state, &self.layout)
    }

    fn post_init(&self) {
        if let Some(leaderboard) = &self.leaderboard {
            let panel = self.layout.ranking_panel;
            leaderboard.post(LeaderboardMessage::Init {
                width: panel.w,
                height: panel.h,
                pixel_ratio: self.viewport.pixel_ratio,
            });
        }
    }

    fn post_fetch(&self) {
        if let Some(leaderboard) = &self.leaderboard {
            leaderboard.post(LeaderboardMessage::Fetch {
                score: self.state.best,
            });
        }
    }

    fn dispatch(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::GameOver { best, .. } => {
                    if self.settings.cloud_save {
                        report_best(self.store.as_deref_mut(), best);
                    }
                    self.post_fetch();
                }
                GameEvent::RankingToggled { visible: true } => self.post_fetch(),
                GameEvent::DifficultyChanged { index } => {
                    self.settings.difficulty = index;
                    self.settings.save();
                }
                _ => {}
            }
        }
    }
}
