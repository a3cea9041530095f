//! Browser canvas acquisition and metrics

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement};

use super::Viewport;

/// Find the game canvas by element id
pub fn game_canvas(document: &Document, id: &str) -> Option<HtmlCanvasElement> {
    document.get_element_by_id(id)?.dyn_into().ok()
}

/// Create a detached canvas (used as the leaderboard's own surface)
pub fn offscreen_canvas(document: &Document) -> Option<HtmlCanvasElement> {
    document.create_element("canvas").ok()?.dyn_into().ok()
}

/// Current logical size of a canvas and the window's pixel ratio
pub fn viewport(canvas: &HtmlCanvasElement) -> Viewport {
    let dpr = web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0);
    Viewport::new(
        canvas.client_width() as f32,
        canvas.client_height() as f32,
        dpr as f32,
    )
}
