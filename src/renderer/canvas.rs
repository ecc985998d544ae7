//! Canvas 2D backend
//!
//! Replays [`DrawCommand`]s on a `CanvasRenderingContext2d` and keeps the
//! backing store matched to the element's CSS size and the device pixel ratio.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::frame::DrawCommand;
use crate::consts::{MIN_CANVAS_HEIGHT, MIN_CANVAS_WIDTH};
use crate::sim::Playfield;

/// A canvas element plus its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up a canvas by element id and acquire its 2D context
    pub fn from_element_id(id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("no #{} element", id)))?
            .dyn_into::<HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Read the current CSS size and resize the backing store to match.
    ///
    /// Called every frame; the element may have been resized since the last.
    pub fn playfield(&self) -> Playfield {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .filter(|r| *r > 0.0)
            .unwrap_or(1.0);
        let rect = self.canvas.get_bounding_client_rect();
        let (width, height) = (rect.width(), rect.height());

        let backing_w = ((width * dpr).floor() as u32).max(MIN_CANVAS_WIDTH);
        let backing_h = ((height * dpr).floor() as u32).max(MIN_CANVAS_HEIGHT);
        if self.canvas.width() != backing_w {
            self.canvas.set_width(backing_w);
        }
        if self.canvas.height() != backing_h {
            self.canvas.set_height(backing_h);
        }
        if let Err(e) = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
            log::warn!("setTransform failed: {:?}", e);
        }

        Playfield::new(width as f32, height as f32)
    }

    /// Execute a frame's draw commands in order
    pub fn draw(&self, commands: &[DrawCommand]) {
        for command in commands {
            if let Err(e) = self.draw_one(command) {
                log::warn!("Draw error: {:?}", e);
            }
        }
    }

    fn draw_one(&self, command: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Clear { size } => {
                ctx.clear_rect(0.0, 0.0, f64::from(size.x), f64::from(size.y));
            }
            DrawCommand::VerticalGradient { size, top, bottom } => {
                let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, f64::from(size.y));
                gradient.add_color_stop(0.0, &top.to_css())?;
                gradient.add_color_stop(1.0, &bottom.to_css())?;
                ctx.set_fill_style_canvas_gradient(&gradient);
                ctx.fill_rect(0.0, 0.0, f64::from(size.x), f64::from(size.y));
            }
            DrawCommand::FillRect {
                origin,
                size,
                color,
            } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(
                    f64::from(origin.x),
                    f64::from(origin.y),
                    f64::from(size.x),
                    f64::from(size.y),
                );
            }
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                ctx.begin_path();
                ctx.set_fill_style_str(&color.to_css());
                ctx.arc(
                    f64::from(center.x),
                    f64::from(center.y),
                    f64::from(*radius),
                    0.0,
                    TAU,
                )?;
                ctx.fill();
            }
            DrawCommand::Line {
                from,
                to,
                width,
                color,
                round_cap,
            } => {
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(f64::from(*width));
                ctx.set_line_cap(if *round_cap { "round" } else { "butt" });
                ctx.begin_path();
                ctx.move_to(f64::from(from.x), f64::from(from.y));
                ctx.line_to(f64::from(to.x), f64::from(to.y));
                ctx.stroke();
            }
            DrawCommand::Triangle {
                points,
                fill,
                outline,
            } => {
                ctx.set_fill_style_str(&fill.to_css());
                ctx.set_stroke_style_str(&outline.to_css());
                ctx.set_line_width(1.0);
                ctx.begin_path();
                ctx.move_to(f64::from(points[0].x), f64::from(points[0].y));
                ctx.line_to(f64::from(points[1].x), f64::from(points[1].y));
                ctx.line_to(f64::from(points[2].x), f64::from(points[2].y));
                ctx.close_path();
                ctx.fill();
                ctx.stroke();
            }
            DrawCommand::Text {
                text,
                pos,
                size_px,
                color,
            } => {
                ctx.save();
                ctx.set_fill_style_str(&color.to_css());
                ctx.set_text_align("center");
                ctx.set_font(&format!("{}px sans-serif", size_px));
                let result = ctx.fill_text(text, f64::from(pos.x), f64::from(pos.y));
                ctx.restore();
                result?;
            }
        }
        Ok(())
    }
}
