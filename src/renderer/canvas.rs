//! Canvas 2D painter for the draw list (web only)

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::{DrawCommand, Shape};
use crate::css_color;

pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    background: String,
}

impl CanvasPainter {
    pub fn new(canvas: &HtmlCanvasElement, width: f32, height: f32, background: u32) -> Result<Self, JsValue> {
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            width: width as f64,
            height: height as f64,
            background: css_color(background),
        })
    }

    /// Clear and paint every command in order
    pub fn paint(&self, commands: &[DrawCommand]) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str(&self.background);
        ctx.fill_rect(0.0, 0.0, self.width, self.height);

        for cmd in commands {
            if cmd.alpha <= 0.0 || cmd.scale == 0.0 {
                continue;
            }
            // Restore before propagating so one failed shape cannot leak its
            // transform into the next
            ctx.save();
            let result = self.draw_command(cmd);
            ctx.restore();
            result?;
        }
        Ok(())
    }

    /// Draw one command; the caller owns save/restore
    fn draw_command(&self, cmd: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_global_alpha(cmd.alpha.clamp(0.0, 1.0) as f64);
        ctx.translate(cmd.pos.x as f64, cmd.pos.y as f64)?;
        ctx.scale(cmd.scale as f64, cmd.scale as f64)?;
        match &cmd.shape {
            Shape::Circle {
                radius,
                fill,
                border,
                border_width,
            } => {
                ctx.begin_path();
                ctx.arc(0.0, 0.0, *radius as f64, 0.0, std::f64::consts::TAU)?;
                ctx.set_fill_style_str(&css_color(*fill));
                ctx.fill();
                if *border_width > 0.0 {
                    ctx.set_line_width(*border_width as f64);
                    ctx.set_stroke_style_str(&css_color(*border));
                    ctx.stroke();
                }
            }
            Shape::RoundedRect {
                size,
                corner_radius,
                fill,
                border,
                border_width,
                label,
                label_color,
            } => {
                self.rounded_rect_path(size.x as f64, size.y as f64, *corner_radius as f64)?;
                ctx.set_fill_style_str(&css_color(*fill));
                ctx.fill();
                ctx.set_line_width(*border_width as f64);
                ctx.set_stroke_style_str(&css_color(*border));
                ctx.stroke();

                ctx.set_font("bold 10px Arial");
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                ctx.set_fill_style_str(&css_color(*label_color));
                ctx.fill_text(label, 0.0, 0.0)?;
            }
        }
        Ok(())
    }

    /// Path for a rectangle centered on the origin
    fn rounded_rect_path(&self, w: f64, h: f64, r: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (x0, y0, x1, y1) = (-w / 2.0, -h / 2.0, w / 2.0, h / 2.0);
        ctx.begin_path();
        ctx.move_to(x0 + r, y0);
        ctx.arc_to(x1, y0, x1, y1, r)?;
        ctx.arc_to(x1, y1, x0, y1, r)?;
        ctx.arc_to(x0, y1, x0, y0, r)?;
        ctx.arc_to(x0, y0, x1, y0, r)?;
        ctx.close_path();
        Ok(())
    }
}
