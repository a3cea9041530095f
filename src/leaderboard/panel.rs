//! The leaderboard panel: message handling and drawing
//!
//! Owns the receiving end of the game's message queue plus its own queue
//! for async completions. `pump` drains both and reports whether the
//! surface needs to be redrawn.

use std::sync::mpsc::{self, Receiver};

use glam::Vec2;

use super::ranking::{RankEntry, build_ranking};
use super::{
    AvatarCache, AvatarLoader, FriendSource, LeaderboardError, LeaderboardMessage, PanelEvent,
    PanelReply,
};
use crate::Rect;
use crate::persistence::BEST_SCORE_KEY;
use crate::renderer::draw::{DrawCmd, TextAlign, backing_size, colors};

const PAD_X: f32 = 12.0;
const TITLE_Y: f32 = 24.0;
const FIRST_ROW_Y: f32 = 40.0;
const ROW_HEIGHT: f32 = 32.0;
const AVATAR_SIZE: f32 = 22.0;
const FONT_SIZE: f32 = 16.0;
/// Distance of the score column from the right edge
const SCORE_INSET: f32 = 60.0;

pub struct LeaderboardPanel {
    /// Logical surface size
    pub size: Vec2,
    pub pixel_ratio: f32,
    ranking: Vec<RankEntry>,
    avatars: AvatarCache,
    inbox: Receiver<LeaderboardMessage>,
    reply: PanelReply,
    events: Receiver<PanelEvent>,
}

impl LeaderboardPanel {
    pub fn new(inbox: Receiver<LeaderboardMessage>) -> Self {
        let (tx, events) = mpsc::channel();
        Self {
            size: Vec2::ZERO,
            pixel_ratio: 1.0,
            ranking: Vec::new(),
            avatars: AvatarCache::new(),
            inbox,
            reply: PanelReply { tx },
            events,
        }
    }

    pub fn ranking(&self) -> &[RankEntry] {
        &self.ranking
    }

    /// Backing-store size in device pixels
    pub fn surface_size(&self) -> (u32, u32) {
        backing_size(self.size.x, self.size.y, self.pixel_ratio)
    }

    /// Process everything queued so far; returns `true` if a redraw is due
    pub fn pump(&mut self, source: &mut dyn FriendSource, loader: &mut dyn AvatarLoader) -> bool {
        let mut redraw = false;
        while let Ok(message) = self.inbox.try_recv() {
            redraw |= self.handle_message(message, source);
        }
        // Sources may reply synchronously, so drain completions after messages
        while let Ok(event) = self.events.try_recv() {
            redraw |= self.handle_event(event, loader);
        }
        redraw
    }

    fn handle_message(&mut self, message: LeaderboardMessage, source: &mut dyn FriendSource) -> bool {
        match message {
            LeaderboardMessage::Init {
                width,
                height,
                pixel_ratio,
            } => {
                self.size = Vec2::new(width.max(0.0), height.max(0.0));
                self.pixel_ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
                true
            }
            LeaderboardMessage::Fetch { score } => {
                log::debug!("Fetching friend ranking (player best {})", score);
                match source.fetch(&[BEST_SCORE_KEY], self.reply.clone()) {
                    Ok(()) => false,
                    Err(LeaderboardError::Unavailable) => {
                        log::debug!("Friend storage unavailable, ranking skipped");
                        false
                    }
                    Err(e) => {
                        log::warn!("{}", e);
                        self.ranking.clear();
                        true
                    }
                }
            }
        }
    }

    fn handle_event(&mut self, event: PanelEvent, loader: &mut dyn AvatarLoader) -> bool {
        match event {
            PanelEvent::Friends(Ok(records)) => {
                self.ranking = build_ranking(&records);
                log::info!("Ranking updated ({} friends)", self.ranking.len());
                let urls: Vec<String> = self
                    .ranking
                    .iter()
                    .filter_map(|entry| entry.avatar_url.clone())
                    .collect();
                for url in urls {
                    if self.avatars.request(&url) {
                        loader.load(&url, self.reply.clone());
                    }
                }
                true
            }
            PanelEvent::Friends(Err(e)) => {
                log::warn!("{}", e);
                self.ranking.clear();
                true
            }
            PanelEvent::Avatar { url, loaded } => {
                if !loaded {
                    log::debug!("Avatar failed to load: {}", url);
                }
                self.avatars.finish(&url, loaded)
            }
        }
    }

    /// Draw the panel in its own surface coordinates
    pub fn draw(&self) -> Vec<DrawCmd> {
        let mut cmds = Vec::with_capacity(2 + self.ranking.len() * 3);
        cmds.push(DrawCmd::FillRect {
            rect: Rect::new(0.0, 0.0, self.size.x, self.size.y),
            color: colors::PANEL_BG,
        });
        cmds.push(DrawCmd::text(
            "Friends",
            Vec2::new(PAD_X, TITLE_Y),
            FONT_SIZE,
            colors::TEXT,
            TextAlign::Left,
        ));

        let name_x = PAD_X + AVATAR_SIZE + 10.0;
        for (i, entry) in self.ranking.iter().enumerate() {
            let y = FIRST_ROW_Y + i as f32 * ROW_HEIGHT;
            if let Some(url) = entry.avatar_url.as_deref() {
                if self.avatars.is_ready(url) {
                    cmds.push(DrawCmd::Avatar {
                        url: url.to_string(),
                        rect: Rect::new(PAD_X, y + 4.0, AVATAR_SIZE, AVATAR_SIZE),
                    });
                }
            }
            cmds.push(DrawCmd::text(
                format!("{}. {}", i + 1, entry.nickname),
                Vec2::new(name_x, y + 18.0),
                FONT_SIZE,
                colors::TEXT,
                TextAlign::Left,
            ));
            cmds.push(DrawCmd::text(
                entry.score.to_string(),
                Vec2::new(self.size.x - SCORE_INSET, y + 18.0),
                FONT_SIZE,
                colors::PANEL_SCORE,
                TextAlign::Left,
            ));
        }
        cmds
    }
}
