//! Display list primitives
//!
//! The scene is described as a flat list of draw commands in painter's
//! order. Backends (Canvas 2D on the web) execute the list; tests inspect it.

use glam::Vec2;

use crate::Rect;

/// RGBA color, components 0-1
pub type Color = [f32; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    FillRect {
        rect: Rect,
        color: Color,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        /// Font size in px (sans-serif)
        size: f32,
        color: Color,
        align: TextAlign,
    },
    /// Circle-clipped avatar image, looked up by URL in the backend's image store
    Avatar { url: String, rect: Rect },
    /// Composite the leaderboard surface into this rectangle
    LeaderboardPanel { rect: Rect },
}

impl DrawCmd {
    pub fn text(text: impl Into<String>, pos: Vec2, size: f32, color: Color, align: TextAlign) -> Self {
        Self::Text {
            text: text.into(),
            pos,
            size,
            color,
            align,
        }
    }
}

/// Convert a color to a CSS `rgba()` string
pub fn css(color: Color) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// Backing-store scale for a device pixel ratio; never below 1
pub fn backing_scale(pixel_ratio: f32) -> f32 {
    if pixel_ratio.is_finite() && pixel_ratio > 1.0 {
        pixel_ratio
    } else {
        1.0
    }
}

/// Backing-store size in device pixels for a logical size
pub fn backing_size(width: f32, height: f32, pixel_ratio: f32) -> (u32, u32) {
    let scale = backing_scale(pixel_ratio);
    (
        (width.max(0.0) * scale).round() as u32,
        (height.max(0.0) * scale).round() as u32,
    )
}

/// Build a color from 8-bit sRGB components
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Colors for game elements
pub mod colors {
    use super::{Color, rgb};

    pub const SKY: Color = rgb(0x88, 0xd8, 0xff);
    pub const GROUND: Color = rgb(0x6a, 0xc3, 0x6a);
    pub const OBSTACLE: Color = rgb(0x4c, 0xaf, 0x50);
    pub const ACTOR: Color = rgb(0xff, 0xd2, 0x00);
    pub const ACTOR_EYE: Color = rgb(0x2a, 0x2a, 0x2a);
    pub const TEXT: Color = rgb(0xff, 0xff, 0xff);
    pub const BUTTON: Color = [0.0, 0.0, 0.0, 0.35];
    pub const BUTTON_ACTIVE: Color = rgb(0xff, 0xd2, 0x00);
    pub const PANEL_BG: Color = rgb(0x1a, 0x1a, 0x1a);
    pub const PANEL_SCORE: Color = rgb(0xff, 0xd2, 0x00);
}
