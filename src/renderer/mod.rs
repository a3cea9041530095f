//! Rendering module
//!
//! The scene is built as a backend-independent display list; the Canvas 2D
//! backend draws it in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod draw;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasRenderer, ImageStore};
pub use draw::{Color, DrawCmd, TextAlign};
