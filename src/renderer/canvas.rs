//! Canvas 2D backend
//!
//! Executes a display list on a `CanvasRenderingContext2d`. The context is
//! scaled by the device pixel ratio so the display list stays in logical
//! units.

use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::draw::{DrawCmd, TextAlign, backing_scale, backing_size, css};

/// Loaded avatar images by URL, shared with the image loader
pub type ImageStore = Rc<RefCell<HashMap<String, HtmlImageElement>>>;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pixel_ratio: f64,
    images: ImageStore,
}

impl CanvasRenderer {
    /// Wrap a canvas; fails if a 2D context cannot be created
    pub fn new(canvas: HtmlCanvasElement, images: ImageStore) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            pixel_ratio: 1.0,
            images,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Resize the backing store to `width`x`height` logical px at `pixel_ratio`
    pub fn resize(&mut self, width: f32, height: f32, pixel_ratio: f32) {
        self.pixel_ratio = backing_scale(pixel_ratio) as f64;
        let (w, h) = backing_size(width, height, pixel_ratio);
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        let _ = self.ctx.scale(self.pixel_ratio, self.pixel_ratio);
    }

    /// Draw a display list; `panel` is composited for `DrawCmd::LeaderboardPanel`
    pub fn render(&self, cmds: &[DrawCmd], panel: Option<&HtmlCanvasElement>) {
        for cmd in cmds {
            match cmd {
                DrawCmd::FillRect { rect, color } => {
                    self.ctx.set_fill_style_str(&css(*color));
                    self.ctx
                        .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
                }
                DrawCmd::FillCircle {
                    center,
                    radius,
                    color,
                } => {
                    self.ctx.set_fill_style_str(&css(*color));
                    self.ctx.begin_path();
                    let _ = self
                        .ctx
                        .arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU);
                    self.ctx.fill();
                }
                DrawCmd::Text {
                    text,
                    pos,
                    size,
                    color,
                    align,
                } => {
                    self.ctx.set_fill_style_str(&css(*color));
                    self.ctx.set_font(&format!("{}px sans-serif", size));
                    self.ctx.set_text_align(match align {
                        TextAlign::Left => "left",
                        TextAlign::Center => "center",
                    });
                    let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
                }
                DrawCmd::Avatar { url, rect } => {
                    let images = self.images.borrow();
                    let Some(image) = images.get(url) else {
                        continue;
                    };
                    let (x, y, size) = (rect.x as f64, rect.y as f64, rect.w as f64);
                    self.ctx.save();
                    self.ctx.begin_path();
                    let _ = self
                        .ctx
                        .arc(x + size / 2.0, y + size / 2.0, size / 2.0, 0.0, TAU);
                    self.ctx.clip();
                    let _ = self
                        .ctx
                        .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, size, size);
                    self.ctx.restore();
                }
                DrawCmd::LeaderboardPanel { rect } => {
                    if let Some(panel) = panel {
                        let _ = self
                            .ctx
                            .draw_image_with_html_canvas_element_and_dw_and_dh(
                                panel,
                                rect.x as f64,
                                rect.y as f64,
                                rect.w as f64,
                                rect.h as f64,
                            );
                    }
                }
            }
        }
        self.ctx.set_text_align("left");
    }
}
