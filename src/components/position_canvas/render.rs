use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::geometry::Point;
use super::grid::{GRID_OPACITY, GRID_STROKE};
use super::marker::{LABEL_COLOR, LABEL_FONT, MARKER_RADIUS, Marker};
use super::state::{CORNER_SIZE, CanvasState, Gesture};

const BACKGROUND: &str = "#ffffff";
const CONTROL_COLOR: &str = "rgba(102, 153, 255, 0.75)";

/// Redraws the whole scene: background, grid, markers, then the selection.
pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_grid(state, ctx);
	for marker in &state.markers {
		draw_marker(marker, ctx);
	}
	if let Some(index) = state.active {
		draw_controls(state, index, ctx);
	}
}

fn draw_grid(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.save();
	ctx.set_global_alpha(GRID_OPACITY);
	ctx.set_stroke_style_str(GRID_STROKE);
	ctx.set_line_width(1.0);
	ctx.begin_path();
	for line in &state.grid {
		ctx.move_to(line.x1, line.y1);
		ctx.line_to(line.x2, line.y2);
	}
	ctx.stroke();
	ctx.restore();
}

fn draw_marker(marker: &Marker, ctx: &CanvasRenderingContext2d) {
	ctx.save();
	let _ = ctx.translate(marker.left, marker.top);
	let _ = ctx.rotate(marker.angle);
	let _ = ctx.scale(marker.scale_x, marker.scale_y);
	ctx.set_global_alpha(marker.opacity);

	ctx.begin_path();
	let _ = ctx.arc(MARKER_RADIUS, MARKER_RADIUS, MARKER_RADIUS, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(marker.color);
	ctx.fill();

	ctx.set_fill_style_str(LABEL_COLOR);
	ctx.set_font(LABEL_FONT);
	ctx.set_text_baseline("top");
	let _ = ctx.fill_text(&marker.label, 0.0, 0.0);
	ctx.restore();
}

fn draw_controls(state: &CanvasState, index: usize, ctx: &CanvasRenderingContext2d) {
	let Some(controls) = state.controls(index) else {
		return;
	};
	ctx.save();
	ctx.set_stroke_style_str(CONTROL_COLOR);
	ctx.set_fill_style_str(CONTROL_COLOR);
	ctx.set_line_width(1.0);

	// Dashed border while a gesture is in progress.
	if !matches!(state.gesture, Gesture::Idle) {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(4.0),
			&JsValue::from_f64(3.0),
		));
	}
	trace_path(ctx, &controls.corners);
	ctx.close_path();
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	ctx.begin_path();
	ctx.move_to(controls.top_mid.x, controls.top_mid.y);
	ctx.line_to(controls.rotate.x, controls.rotate.y);
	ctx.stroke();

	let half = CORNER_SIZE / 2.0;
	for c in controls.corners.iter().chain(std::iter::once(&controls.rotate)) {
		ctx.fill_rect(c.x - half, c.y - half, CORNER_SIZE, CORNER_SIZE);
	}
	ctx.restore();
}

fn trace_path(ctx: &CanvasRenderingContext2d, points: &[Point]) {
	ctx.begin_path();
	for (i, p) in points.iter().enumerate() {
		if i == 0 {
			ctx.move_to(p.x, p.y);
		} else {
			ctx.line_to(p.x, p.y);
		}
	}
}
