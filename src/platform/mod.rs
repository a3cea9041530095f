//! Platform abstraction layer
//!
//! Device metrics for the playfield. The browser build reads them from the
//! window and the game canvas; native builds use a fixed portrait screen.

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Logical screen size plus device pixel ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    /// Build a viewport, replacing degenerate values with defaults
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        let sane = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
        Self {
            width: sane(width, DEFAULT_WIDTH),
            height: sane(height, DEFAULT_HEIGHT),
            pixel_ratio: sane(pixel_ratio, 1.0),
        }
    }
}
