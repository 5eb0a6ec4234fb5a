//! Canvas 2D backend: replays draw commands onto a `CanvasRenderingContext2d`

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::command::DrawCommand;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Fails when the canvas has no 2D context
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2D context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    /// Draw one frame
    pub fn draw(&self, commands: &[DrawCommand]) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        for cmd in commands {
            match cmd {
                DrawCommand::Clear { color, size } => {
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
                }
                DrawCommand::Rect {
                    pos,
                    size,
                    color,
                    alpha,
                } => {
                    ctx.set_global_alpha(*alpha as f64);
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
                    ctx.set_global_alpha(1.0);
                }
                DrawCommand::Triangle {
                    points,
                    color,
                    glow,
                } => {
                    if *glow > 0.0 {
                        ctx.set_shadow_blur(*glow as f64);
                        ctx.set_shadow_color(color);
                    }
                    ctx.set_fill_style_str(color);
                    ctx.begin_path();
                    ctx.move_to(points[0].x as f64, points[0].y as f64);
                    for p in &points[1..] {
                        ctx.line_to(p.x as f64, p.y as f64);
                    }
                    ctx.close_path();
                    ctx.fill();
                    ctx.set_shadow_blur(0.0);
                }
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => {
                    ctx.set_fill_style_str(color);
                    ctx.begin_path();
                    ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                    ctx.fill();
                }
                DrawCommand::Ellipse {
                    center,
                    radii,
                    color,
                } => {
                    ctx.set_fill_style_str(color);
                    ctx.begin_path();
                    ctx.ellipse(
                        center.x as f64,
                        center.y as f64,
                        radii.x as f64,
                        radii.y as f64,
                        0.0,
                        0.0,
                        TAU,
                    )?;
                    ctx.fill();
                }
                DrawCommand::Text {
                    text,
                    pos,
                    font,
                    align,
                    color,
                } => {
                    ctx.set_font(font);
                    ctx.set_text_align(align.as_css());
                    ctx.set_fill_style_str(color);
                    ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
                }
            }
        }
        Ok(())
    }
}
