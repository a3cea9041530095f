//! Best-score persistence
//!
//! The game writes a single value, the best score, to a per-user key/value
//! store whenever a run ends. Values are strings keyed by name. There is no
//! read path at startup. If no store is available the write is skipped.

use std::collections::HashMap;
use std::fmt;

/// Key the best score is stored under (also read by the leaderboard)
pub const BEST_SCORE_KEY: &str = "bestScore";

/// Errors from a key/value store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The host has no store for this user
    Unavailable,
    /// The store refused the write
    Rejected(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::Rejected(reason) => write!(f, "storage rejected write: {}", reason),
        }
    }
}

impl std::error::Error for StorageError {}

/// A per-user string key/value store
pub trait CloudStore {
    fn set_value(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Write the best score, logging and swallowing any failure
///
/// Returns whether the value was stored.
pub fn report_best(store: Option<&mut (dyn CloudStore + '_)>, best: u32) -> bool {
    let Some(store) = store else {
        log::debug!("No cloud store, best score {} not saved", best);
        return false;
    };
    match store.set_value(BEST_SCORE_KEY, &best.to_string()) {
        Ok(()) => {
            log::info!("Best score {} saved", best);
            true
        }
        Err(e) => {
            log::warn!("Could not save best score: {}", e);
            false
        }
    }
}

/// In-process store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl CloudStore for MemoryStore {
    fn set_value(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by the browser's LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// Key prefix so game values don't collide with other pages on the origin
    const PREFIX: &'static str = "tap_flap_";

    /// Open the store, or `None` if LocalStorage is blocked or missing
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl CloudStore for LocalStorageStore {
    fn set_value(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let full_key = format!("{}{}", Self::PREFIX, key);
        self.storage
            .set_item(&full_key, value)
            .map_err(|e| StorageError::Rejected(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingStore;

    impl CloudStore for FailingStore {
        fn set_value(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Rejected("quota".to_string()))
        }
    }

    #[test]
    fn test_report_best_writes_string_value() {
        let mut store = MemoryStore::new();
        assert!(report_best(Some(&mut store), 17));
        assert_eq!(store.get(BEST_SCORE_KEY), Some("17"));
    }

    #[test]
    fn test_report_best_without_store_is_skipped() {
        assert!(!report_best(None, 17));
    }

    #[test]
    fn test_report_best_swallows_errors() {
        let mut store = FailingStore;
        assert!(!report_best(Some(&mut store), 3));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(StorageError::Unavailable.to_string(), "storage unavailable");
        assert_eq!(
            StorageError::Rejected("quota".into()).to_string(),
            "storage rejected write: quota"
        );
    }
}
