//! Converts host frame timestamps into simulation delta time
//!
//! The host calls back once per animation frame with a monotonic timestamp
//! in milliseconds. There is no fixed step: each frame advances the session
//! by the real elapsed time.

/// Tracks the previous frame timestamp
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    /// Optional upper bound on a single step, in seconds
    max_dt: Option<f32>,
}

impl FrameClock {
    /// Unclamped clock: a long stall becomes one long step
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock that caps each step at `max_dt` seconds
    pub fn with_max_dt(max_dt: Option<f32>) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous timestamp; 0 on the first frame
    pub fn delta(&mut self, timestamp_ms: f64) -> f32 {
        let last = self.last_ms.replace(timestamp_ms).unwrap_or(timestamp_ms);
        // Timestamps are monotonic, but never feed a negative step to the sim
        let dt = ((timestamp_ms - last) / 1000.0).max(0.0) as f32;
        match self.max_dt {
            Some(max) => dt.min(max),
            None => dt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(12_345.0), 0.0);
        assert!((clock.delta(12_345.0 + 16.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_zero_timestamp_is_a_real_frame() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(0.0), 0.0);
        assert_eq!(clock.delta(500.0), 0.5);
    }

    #[test]
    fn test_unclamped_by_default() {
        let mut clock = FrameClock::new();
        clock.delta(0.0);
        assert_eq!(clock.delta(30_000.0), 30.0);
    }

    #[test]
    fn test_clamp() {
        let mut clock = FrameClock::with_max_dt(Some(0.1));
        clock.delta(0.0);
        assert_eq!(clock.delta(5_000.0), 0.1);
        assert!((clock.delta(5_050.0) - 0.05).abs() < 1e-6);
    }
}
