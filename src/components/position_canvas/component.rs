use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::geometry::Point;
use super::marker::{FALLBACK_GLYPH_WIDTH, LABEL_FONT};
use super::render;
use super::scale::m2pix;
use super::state::{CanvasState, TransformEvent};
use super::types::NodeRecord;
use crate::net::api;

pub const CANVAS_WIDTH: f64 = 1000.0;
pub const CANVAS_HEIGHT: f64 = 700.0;
pub const GRID_CELL_METERS: f64 = 10.0;

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn label_width(ctx: &CanvasRenderingContext2d, label: &str) -> f64 {
	ctx.set_font(LABEL_FONT);
	ctx.measure_text(label)
		.map(|m| m.width())
		.unwrap_or(label.len() as f64 * FALLBACK_GLYPH_WIDTH)
}

fn pointer(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn send_update(event: TransformEvent) {
	let record = event.record;
	leptos::task::spawn_local(async move {
		if let Err(err) = api::post_position(&record).await {
			debug!("dropped update for node {}: {}", record.i, err);
		}
	});
}

/// Fixed-size canvas showing one draggable marker per record.
///
/// Every move, scale or rotate step posts the marker's record back to the
/// backend; a new `records` value replaces all markers.
#[component]
pub fn PositionCanvas(
	#[prop(into)] records: Signal<Vec<NodeRecord>>,
	#[prop(default = CANVAS_WIDTH)] width: f64,
	#[prop(default = CANVAS_HEIGHT)] height: f64,
	#[prop(default = GRID_CELL_METERS)] grid_cell_meters: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state = Rc::new(RefCell::new(CanvasState::new(
		width,
		height,
		m2pix(grid_cell_meters),
	)));
	let ctx: Rc<RefCell<Option<CanvasRenderingContext2d>>> = Rc::new(RefCell::new(None));
	let (state_init, ctx_init) = (state.clone(), ctx.clone());

	Effect::new(move |_| {
		let data = records.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let Some(context) = context_2d(&canvas) else {
			warn!("canvas has no 2d context");
			return;
		};
		let mut s = state_init.borrow_mut();
		s.load(&data, |label| label_width(&context, label));
		debug!("placed {} markers", s.markers.len());
		render::render(&s, &context);
		*ctx_init.borrow_mut() = Some(context);
	});

	// Runs `f` against the state with the pointer position, then repaints.
	let with_pointer = {
		let (state, ctx) = (state.clone(), ctx.clone());
		move |ev: &MouseEvent, f: &dyn Fn(&mut CanvasState, Point, &HtmlCanvasElement)| {
			let Some(canvas) = canvas_ref.get() else {
				return;
			};
			let canvas: HtmlCanvasElement = canvas.into();
			let p = pointer(&canvas, ev);
			let mut s = state.borrow_mut();
			f(&mut *s, p, &canvas);
			if let Some(ref context) = *ctx.borrow() {
				render::render(&s, context);
			}
		}
	};

	let on_mousedown = {
		let with_pointer = with_pointer.clone();
		move |ev: MouseEvent| {
			with_pointer(&ev, &|s, p, _| s.pointer_down(p));
		}
	};

	let on_mousemove = {
		let with_pointer = with_pointer.clone();
		move |ev: MouseEvent| {
			with_pointer(&ev, &|s, p, canvas| {
				if let Some(event) = s.pointer_move(p) {
					send_update(event);
				}
				let _ = web_sys::HtmlElement::style(canvas).set_property("cursor", s.cursor_at(p));
			});
		}
	};

	let on_mouseup = {
		let state = state.clone();
		move |_: MouseEvent| state.borrow_mut().pointer_up()
	};

	let on_mouseleave = move |_: MouseEvent| state.borrow_mut().pointer_up();

	view! {
		<canvas
			node_ref=canvas_ref
			class="position-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block;"
		/>
	}
}
