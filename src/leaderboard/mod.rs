//! Friends leaderboard collaborator
//!
//! The leaderboard runs as an isolated panel with its own surface. The game
//! talks to it only through one-way messages (`init` on startup/resize,
//! `fetch` after a run or when the panel opens). Nothing is acknowledged and
//! the game never waits on it. Async completions inside the panel (friend
//! records, avatar images) come back through the panel's own queue.

pub mod avatar;
pub mod panel;
pub mod ranking;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use avatar::{AvatarCache, AvatarSlot};
pub use panel::LeaderboardPanel;
pub use ranking::{FriendRecord, MAX_RANKED, RankEntry, build_ranking, decode_records, parse_score};

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};

/// Messages from the game to the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LeaderboardMessage {
    /// Surface size in logical px plus device pixel ratio
    Init {
        width: f32,
        height: f32,
        #[serde(rename = "pixelRatio")]
        pixel_ratio: f32,
    },
    /// Refresh the ranking; carries the player's best score
    Fetch { score: u32 },
}

/// Fire-and-forget sending half held by the game
#[derive(Debug, Clone)]
pub struct LeaderboardSender {
    tx: Sender<LeaderboardMessage>,
}

impl LeaderboardSender {
    /// Post a message; a closed panel is not an error
    pub fn post(&self, message: LeaderboardMessage) {
        log::debug!("Leaderboard <- {:?}", message);
        if self.tx.send(message).is_err() {
            log::debug!("Leaderboard panel gone, message dropped");
        }
    }
}

/// Create the game -> panel message queue
pub fn channel() -> (LeaderboardSender, Receiver<LeaderboardMessage>) {
    let (tx, rx) = mpsc::channel();
    (LeaderboardSender { tx }, rx)
}

/// Errors from fetching friend records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardError {
    /// The host has no friend storage
    Unavailable,
    Fetch(String),
    Decode(String),
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "friend storage unavailable"),
            Self::Fetch(reason) => write!(f, "friend fetch failed: {}", reason),
            Self::Decode(reason) => write!(f, "friend records malformed: {}", reason),
        }
    }
}

impl std::error::Error for LeaderboardError {}

/// Completion events delivered back into the panel
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    Friends(Result<Vec<FriendRecord>, LeaderboardError>),
    Avatar { url: String, loaded: bool },
}

/// Handle given to async sources so they can report back to the panel
#[derive(Debug, Clone)]
pub struct PanelReply {
    tx: Sender<PanelEvent>,
}

impl PanelReply {
    pub fn friends(&self, result: Result<Vec<FriendRecord>, LeaderboardError>) {
        let _ = self.tx.send(PanelEvent::Friends(result));
    }

    pub fn avatar(&self, url: &str, loaded: bool) {
        let _ = self.tx.send(PanelEvent::Avatar {
            url: url.to_string(),
            loaded,
        });
    }
}

/// Where friend records come from
pub trait FriendSource {
    /// Start a fetch of records holding `keys`; results arrive via `reply`
    ///
    /// Returns `Err(LeaderboardError::Unavailable)` if the host has no such
    /// capability, in which case nothing will be delivered.
    fn fetch(&mut self, keys: &[&str], reply: PanelReply) -> Result<(), LeaderboardError>;
}

/// Loads avatar images; completion arrives via `reply`
pub trait AvatarLoader {
    fn load(&mut self, url: &str, reply: PanelReply);
}

/// Fixed list of records, delivered immediately (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct StaticFriendSource {
    pub records: Vec<FriendRecord>,
}

impl FriendSource for StaticFriendSource {
    fn fetch(&mut self, _keys: &[&str], reply: PanelReply) -> Result<(), LeaderboardError> {
        reply.friends(Ok(self.records.clone()));
        Ok(())
    }
}

/// Host without friend storage
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFriendSource;

impl FriendSource for NoFriendSource {
    fn fetch(&mut self, _keys: &[&str], _reply: PanelReply) -> Result<(), LeaderboardError> {
        Err(LeaderboardError::Unavailable)
    }
}

/// Loader with no image support: every avatar fails, rows draw without one
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAvatars;

impl AvatarLoader for NoAvatars {
    fn load(&mut self, url: &str, reply: PanelReply) {
        reply.avatar(url, false);
    }
}
