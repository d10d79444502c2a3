//! Rendering: draws the full canvas scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only [`Scene`] and produces pixels; it does not mutate
//! any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::doc::DocStore;
use crate::entity::{Entity, EntityKind};
use crate::geom::{Point, Shape};
use crate::input::UiState;
use crate::snap::{DrawHelpers, HoveredSnapPoint};
use crate::viewport::Viewport;

/// Stroke for selected entities.
const SELECTED_COLOR: &str = "#1E90FF";
/// Stroke for the entity under the cursor.
const HIGHLIGHT_COLOR: &str = "#FFB000";
const GUIDE_COLOR: &str = "rgba(0, 200, 120, 0.7)";
const SNAP_COLOR: &str = "#00C878";
const CURSOR_COLOR: &str = "#ffffff";

/// Radius of a point entity, in screen pixels.
const POINT_RADIUS_PX: f64 = 3.0;
/// Half-size of the snap marker square, in screen pixels.
const SNAP_MARKER_PX: f64 = 5.0;
/// Half-length of the cursor crosshair arms, in screen pixels.
const CURSOR_ARM_PX: f64 = 8.0;
/// Dash segment length for guides and the selection drag, in screen pixels.
const DASH_PX: f64 = 4.0;

/// Read-only view of everything drawn in one frame.
pub struct Scene<'a> {
    pub doc: &'a DocStore,
    pub active: Option<&'a Entity>,
    pub helpers: &'a DrawHelpers,
    pub hovered: &'a [HoveredSnapPoint],
    pub ui: &'a UiState,
    pub viewport: &'a Viewport,
    pub mouse_world: Point,
}

/// Draw the full scene: committed entities, the construction preview, then
/// guides, snap markers and the cursor on top.
///
/// `viewport_w` and `viewport_h` are in CSS pixels. `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    scene: &Scene<'_>,
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    let scale = scene.viewport.scale;

    // Layer 1: clear, then map world onto screen as (p - offset) * scale.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport_w, viewport_h);
    ctx.scale(scale, scale)?;
    ctx.translate(-scene.viewport.offset.x, -scene.viewport.offset.y)?;

    // Layer 2: committed entities in draw order.
    for entity in scene.doc.entities() {
        let Some(shape) = entity.shape() else {
            continue;
        };
        let color = if scene.ui.selected_ids.contains(&entity.id) {
            SELECTED_COLOR
        } else if scene.ui.highlighted_ids.contains(&entity.id) {
            HIGHLIGHT_COLOR
        } else {
            entity.line_color.as_str()
        };
        draw_shape(ctx, &shape, color, entity.line_width, scale)?;
    }

    // Layer 3: construction preview stretched to the mouse.
    if let Some(active) = scene.active {
        draw_preview(ctx, active, scene.mouse_world, scale)?;
    }

    // Layer 4: helpers.
    if let Some(guide) = scene.helpers.angle_guide {
        ctx.save();
        set_dash(ctx, DASH_PX / scale)?;
        ctx.set_stroke_style_str(GUIDE_COLOR);
        ctx.set_line_width(1.0 / scale);
        ctx.begin_path();
        ctx.move_to(guide.start.x, guide.start.y);
        ctx.line_to(guide.end.x, guide.end.y);
        ctx.stroke();
        set_dash(ctx, 0.0)?;
        ctx.restore();
    }
    for hovered in scene.hovered {
        draw_snap_marker(ctx, hovered.snap_point.point, scale, false);
    }
    let snap = scene.helpers.entity_snap_point.or(scene.helpers.angle_snap_point);
    if let Some(sp) = snap {
        draw_snap_marker(ctx, sp.point, scale, true);
    }

    // Layer 5: cursor.
    draw_cursor(ctx, scene.mouse_world, scale);

    Ok(())
}

// =============================================================
// Shapes
// =============================================================

fn draw_shape(ctx: &CanvasRenderingContext2d, shape: &Shape, color: &str, line_width: f64, scale: f64) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(line_width);
    match shape {
        Shape::Point(p) => {
            ctx.set_fill_style_str(color);
            ctx.begin_path();
            ctx.arc(p.x, p.y, POINT_RADIUS_PX / scale, 0.0, 2.0 * PI)?;
            ctx.fill();
        }
        Shape::Segment(s) => {
            ctx.begin_path();
            ctx.move_to(s.start.x, s.start.y);
            ctx.line_to(s.end.x, s.end.y);
            ctx.stroke();
        }
        Shape::Box(b) => ctx.stroke_rect(b.xmin, b.ymin, b.width(), b.height()),
        Shape::Circle(c) => {
            ctx.begin_path();
            ctx.arc(c.center.x, c.center.y, c.radius, 0.0, 2.0 * PI)?;
            ctx.stroke();
        }
    }
    ctx.restore();
    Ok(())
}

fn draw_preview(ctx: &CanvasRenderingContext2d, entity: &Entity, mouse: Point, scale: f64) -> Result<(), JsValue> {
    let Some(shape) = entity.preview_shape(mouse) else {
        return Ok(());
    };
    if let (EntityKind::SelectionRectangle(_), Shape::Box(b)) = (&entity.kind, &shape) {
        ctx.save();
        set_dash(ctx, DASH_PX / scale)?;
        ctx.set_stroke_style_str(SELECTED_COLOR);
        ctx.set_fill_style_str("rgba(30, 144, 255, 0.12)");
        ctx.set_line_width(1.0 / scale);
        ctx.fill_rect(b.xmin, b.ymin, b.width(), b.height());
        ctx.stroke_rect(b.xmin, b.ymin, b.width(), b.height());
        set_dash(ctx, 0.0)?;
        ctx.restore();
        return Ok(());
    }
    draw_shape(ctx, &shape, &entity.line_color, entity.line_width, scale)
}

// =============================================================
// Overlays
// =============================================================

fn draw_snap_marker(ctx: &CanvasRenderingContext2d, p: Point, scale: f64, active: bool) {
    let half = SNAP_MARKER_PX / scale;
    ctx.save();
    ctx.set_stroke_style_str(SNAP_COLOR);
    ctx.set_line_width(if active { 2.0 / scale } else { 1.0 / scale });
    ctx.stroke_rect(p.x - half, p.y - half, half * 2.0, half * 2.0);
    ctx.restore();
}

fn draw_cursor(ctx: &CanvasRenderingContext2d, p: Point, scale: f64) {
    let arm = CURSOR_ARM_PX / scale;
    ctx.save();
    ctx.set_stroke_style_str(CURSOR_COLOR);
    ctx.set_line_width(1.0 / scale);
    ctx.begin_path();
    ctx.move_to(p.x - arm, p.y);
    ctx.line_to(p.x + arm, p.y);
    ctx.move_to(p.x, p.y - arm);
    ctx.line_to(p.x, p.y + arm);
    ctx.stroke();
    ctx.restore();
}

/// Set a uniform dash pattern; `0` restores solid lines.
fn set_dash(ctx: &CanvasRenderingContext2d, dash: f64) -> Result<(), JsValue> {
    let dash_array = js_sys::Array::new();
    if dash > 0.0 {
        dash_array.push(&dash.into());
        dash_array.push(&dash.into());
    }
    ctx.set_line_dash(&dash_array)
}
