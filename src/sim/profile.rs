//! Difficulty presets
//!
//! A small fixed table of simulation constants. The session copies the
//! selected preset, so swapping profiles never touches a running game.

use super::obstacle::gap_top_range;

/// A named bundle of simulation constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub label: &'static str,
    /// Vertical size of the passable gap
    pub gap_height: f32,
    /// Obstacle scroll speed (units/s)
    pub speed: f32,
    /// Time between spawns (ms)
    pub spawn_interval_ms: f32,
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Velocity set by a flap (negative = up)
    pub flap_impulse: f32,
}

/// All profiles in selector order
pub const PROFILES: [DifficultyProfile; 3] = [
    DifficultyProfile {
        label: "Easy",
        gap_height: 180.0,
        speed: 150.0,
        spawn_interval_ms: 1600.0,
        gravity: 640.0,
        flap_impulse: -250.0,
    },
    DifficultyProfile {
        label: "Normal",
        gap_height: 160.0,
        speed: 180.0,
        spawn_interval_ms: 1400.0,
        gravity: 720.0,
        flap_impulse: -260.0,
    },
    DifficultyProfile {
        label: "Hard",
        gap_height: 130.0,
        speed: 220.0,
        spawn_interval_ms: 1200.0,
        gravity: 820.0,
        flap_impulse: -280.0,
    },
];

/// Profile selected when nothing else has been chosen
pub const DEFAULT_PROFILE: usize = 1;

impl DifficultyProfile {
    /// Look up a profile, falling back to the first one for out-of-range indices
    pub fn get(index: usize) -> (usize, DifficultyProfile) {
        match PROFILES.get(index) {
            Some(profile) => (index, *profile),
            None => (0, PROFILES[0]),
        }
    }

    /// Whether this profile's gap fits a playfield of the given height
    pub fn fits(&self, playfield_height: f32) -> bool {
        gap_top_range(playfield_height, self.gap_height).is_some()
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        PROFILES[DEFAULT_PROFILE]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_normal() {
        let profile = DifficultyProfile::default();
        assert_eq!(profile.label, "Normal");
        assert_eq!(profile.gap_height, 160.0);
        assert_eq!(profile.flap_impulse, -260.0);
    }

    #[test]
    fn test_invalid_index_falls_back_to_first() {
        let (index, profile) = DifficultyProfile::get(99);
        assert_eq!(index, 0);
        assert_eq!(profile, PROFILES[0]);
        let (index, profile) = DifficultyProfile::get(2);
        assert_eq!(index, 2);
        assert_eq!(profile.label, "Hard");
    }

    #[test]
    fn test_all_profiles_fit_default_playfield() {
        for profile in PROFILES {
            assert!(profile.fits(crate::consts::DEFAULT_HEIGHT), "{}", profile.label);
        }
        assert!(!PROFILES[0].fits(250.0));
    }
}
