//! Executes draw-call lists against a 2D canvas context.
//!
//! This is the only module that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives the screen-space command lists produced by [`crate::render`]
//! and turns them into pixels — no application state, no coordinate math.
//! All fallible canvas calls propagate errors via `Result<(), JsValue>`.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::render::{DrawCmd, Stroke};

/// Dash segment length in pixels for dashed strokes.
const DASH_PX: f64 = 5.0;

/// Execute `cmds` against `ctx` for a viewport of `width` × `height` CSS
/// pixels at the given device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any canvas call fails (e.g. invalid context state).
pub fn paint(
    ctx: &CanvasRenderingContext2d,
    cmds: &[DrawCmd],
    width: f64,
    height: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;

    for cmd in cmds {
        match cmd {
            DrawCmd::Clear { wash } => match wash {
                Some(color) => {
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(0.0, 0.0, width, height);
                }
                None => ctx.clear_rect(0.0, 0.0, width, height),
            },
            DrawCmd::Rect { x, y, width: w, height: h, fill, stroke } => {
                if let Some(color) = fill {
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(*x, *y, *w, *h);
                }
                if let Some(stroke) = stroke {
                    apply_stroke(ctx, stroke)?;
                    ctx.stroke_rect(*x, *y, *w, *h);
                    clear_dash(ctx)?;
                }
            }
            DrawCmd::Circle { cx, cy, radius, fill, stroke } => {
                ctx.begin_path();
                ctx.arc(*cx, *cy, radius.max(0.0), 0.0, std::f64::consts::TAU)?;
                if let Some(color) = fill {
                    ctx.set_fill_style_str(color);
                    ctx.fill();
                }
                if let Some(stroke) = stroke {
                    apply_stroke(ctx, stroke)?;
                    ctx.stroke();
                    clear_dash(ctx)?;
                }
            }
            DrawCmd::Segment { x1, y1, x2, y2, stroke } => {
                apply_stroke(ctx, stroke)?;
                ctx.begin_path();
                ctx.move_to(*x1, *y1);
                ctx.line_to(*x2, *y2);
                ctx.stroke();
                clear_dash(ctx)?;
            }
            DrawCmd::Polyline { points, closed, fill, stroke } => {
                let Some(first) = points.first() else {
                    continue;
                };
                ctx.begin_path();
                ctx.move_to(first.x, first.y);
                for p in &points[1..] {
                    ctx.line_to(p.x, p.y);
                }
                if *closed {
                    ctx.close_path();
                }
                if let Some(color) = fill {
                    ctx.set_fill_style_str(color);
                    ctx.fill();
                }
                if let Some(stroke) = stroke {
                    apply_stroke(ctx, stroke)?;
                    ctx.stroke();
                    clear_dash(ctx)?;
                }
            }
            DrawCmd::Text { x, y, text, color, size_px } => {
                ctx.set_fill_style_str(color);
                ctx.set_text_align("center");
                ctx.set_font(&format!("bold {size_px:.0}px Arial"));
                ctx.fill_text(text, *x, *y)?;
            }
        }
    }

    Ok(())
}

fn apply_stroke(ctx: &CanvasRenderingContext2d, stroke: &Stroke) -> Result<(), JsValue> {
    ctx.set_stroke_style_str(&stroke.color);
    ctx.set_line_width(stroke.width);
    if stroke.dashed {
        let dash = js_sys::Array::new();
        dash.push(&DASH_PX.into());
        dash.push(&DASH_PX.into());
        ctx.set_line_dash(&dash)?;
    }
    Ok(())
}

fn clear_dash(ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
    ctx.set_line_dash(&js_sys::Array::new())
}
