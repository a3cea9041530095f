//! Player preferences and runtime options
//!
//! Persisted in LocalStorage on the web, defaults on native.

use serde::{Deserialize, Serialize};

use crate::sim::{DEFAULT_PROFILE, PROFILES};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Last selected difficulty profile
    pub difficulty: usize,

    /// Cap on a single frame step in seconds; `None` = unclamped
    pub max_frame_dt: Option<f32>,

    /// Endpoint serving friend records; `None` disables the leaderboard fetch
    pub leaderboard_url: Option<String>,

    /// Write the best score to the cloud store when a run ends
    pub cloud_save: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_PROFILE,
            max_frame_dt: None,
            leaderboard_url: None,
            cloud_save: true,
        }
    }
}

impl Settings {
    /// Difficulty index, with out-of-range values mapped to the default
    pub fn difficulty(&self) -> usize {
        if self.difficulty < PROFILES.len() {
            self.difficulty
        } else {
            DEFAULT_PROFILE
        }
    }

    /// Parse settings JSON, falling back to defaults on any error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "tap_flap_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.difficulty(), DEFAULT_PROFILE);
        assert_eq!(settings.max_frame_dt, None);
        assert!(settings.cloud_save);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"difficulty": 2, "max_frame_dt": 0.1}"#);
        assert_eq!(settings.difficulty(), 2);
        assert_eq!(settings.max_frame_dt, Some(0.1));
        assert!(settings.cloud_save);
        assert_eq!(settings.leaderboard_url, None);
    }

    #[test]
    fn test_malformed_json_is_default() {
        assert_eq!(Settings::from_json("{not json"), Settings::default());
    }

    #[test]
    fn test_out_of_range_difficulty() {
        let settings = Settings {
            difficulty: 9,
            ..Settings::default()
        };
        assert_eq!(settings.difficulty(), DEFAULT_PROFILE);
    }
}
