use log::trace;

use super::geometry::{Point, Quad, quads_intersect};
use super::grid::{GridLine, grid_lines};
use super::marker::{Marker, NORMAL_OPACITY, OVERLAP_OPACITY};
use super::types::NodeRecord;

/// Side length of a corner scale handle.
pub const CORNER_SIZE: f64 = 12.0;
/// Distance of the rotation handle above the marker's top edge.
pub const ROTATION_OFFSET: f64 = 40.0;
pub const MIN_SCALE: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformKind {
	Moving,
	Scaling,
	Rotating,
}

/// Emitted once per pointer move while a gesture is active.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformEvent {
	pub kind: TransformKind,
	pub index: usize,
	/// The marker's record after the transform, in millimeters.
	pub record: NodeRecord,
}

/// Handles drawn around the selected marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Control {
	/// Index into [`Controls::corners`].
	Corner(usize),
	Rotate,
}

#[derive(Clone, Copy, Debug)]
pub struct Controls {
	pub corners: Quad,
	pub top_mid: Point,
	pub rotate: Point,
}

#[derive(Clone, Copy, Debug, Default)]
pub enum Gesture {
	#[default]
	Idle,
	Moving {
		index: usize,
		/// Pointer offset from the marker origin at press time.
		grab: Point,
	},
	Scaling {
		index: usize,
		anchor_local: Point,
		anchor_world: Point,
		/// Unscaled vector from the anchor corner to the dragged corner.
		diagonal: Point,
	},
	Rotating {
		index: usize,
		center: Point,
		pointer_angle: f64,
		start_angle: f64,
	},
}

pub struct CanvasState {
	pub width: f64,
	pub height: f64,
	pub grid_spacing: f64,
	pub grid: Vec<GridLine>,
	pub markers: Vec<Marker>,
	pub active: Option<usize>,
	pub gesture: Gesture,
}

impl CanvasState {
	pub fn new(width: f64, height: f64, grid_spacing: f64) -> Self {
		Self {
			width,
			height,
			grid_spacing,
			grid: Vec::new(),
			markers: Vec::new(),
			active: None,
			gesture: Gesture::Idle,
		}
	}

	/// Replaces every marker with one per record. `label_width` measures a
	/// label in pixels.
	pub fn load(&mut self, records: &[NodeRecord], label_width: impl Fn(&str) -> f64) {
		self.grid = grid_lines(self.width, self.height, self.grid_spacing);
		self.markers = records
			.iter()
			.enumerate()
			.map(|(i, record)| Marker::new(record.clone(), i, label_width(&record.i.to_string())))
			.collect();
		self.active = None;
		self.gesture = Gesture::Idle;
	}

	/// Topmost marker under `p`.
	pub fn marker_at(&self, p: Point) -> Option<usize> {
		self.markers.iter().rposition(|m| m.contains(p))
	}

	pub fn controls(&self, index: usize) -> Option<Controls> {
		let marker = self.markers.get(index)?;
		let top_mid = marker.to_world(Point::new(marker.width / 2.0, 0.0));
		Some(Controls {
			corners: marker.corners(),
			top_mid,
			rotate: top_mid + Point::new(0.0, -ROTATION_OFFSET).rotated(marker.angle),
		})
	}

	/// Handle of the selected marker under `p`.
	pub fn control_at(&self, p: Point) -> Option<Control> {
		let controls = self.controls(self.active?)?;
		let half = CORNER_SIZE / 2.0;
		let hit = |c: Point| (p.x - c.x).abs() <= half && (p.y - c.y).abs() <= half;
		if hit(controls.rotate) {
			return Some(Control::Rotate);
		}
		controls.corners.iter().position(|&c| hit(c)).map(Control::Corner)
	}

	pub fn pointer_down(&mut self, p: Point) {
		if let (Some(index), Some(control)) = (self.active, self.control_at(p)) {
			let marker = &self.markers[index];
			self.gesture = match control {
				Control::Corner(corner) => {
					let locals = [
						Point::new(0.0, 0.0),
						Point::new(marker.width, 0.0),
						Point::new(marker.width, marker.height),
						Point::new(0.0, marker.height),
					];
					let anchor_local = locals[(corner + 2) % 4];
					Gesture::Scaling {
						index,
						anchor_local,
						anchor_world: marker.to_world(anchor_local),
						diagonal: locals[corner] - anchor_local,
					}
				}
				Control::Rotate => {
					let center = marker.center();
					Gesture::Rotating {
						index,
						center,
						pointer_angle: (p - center).angle(),
						start_angle: marker.angle,
					}
				}
			};
			return;
		}

		match self.marker_at(p) {
			Some(index) => {
				self.active = Some(index);
				self.gesture = Gesture::Moving {
					index,
					grab: p - self.markers[index].origin(),
				};
			}
			None => {
				self.active = None;
				self.gesture = Gesture::Idle;
			}
		}
	}

	/// Applies the active gesture, refreshes the overlap cue and returns the
	/// updated record.
	pub fn pointer_move(&mut self, p: Point) -> Option<TransformEvent> {
		let (index, kind) = match self.gesture {
			Gesture::Idle => return None,
			Gesture::Moving { index, grab } => {
				let marker = self.markers.get_mut(index)?;
				let origin = p - grab;
				marker.left = origin.x;
				marker.top = origin.y;
				(index, TransformKind::Moving)
			}
			Gesture::Scaling {
				index,
				anchor_local,
				anchor_world,
				diagonal,
			} => {
				let marker = self.markers.get_mut(index)?;
				let v = (p - anchor_world).rotated(-marker.angle);
				let scale = (v.dot(diagonal) / diagonal.dot(diagonal)).max(MIN_SCALE);
				marker.scale_x = scale;
				marker.scale_y = scale;
				marker.pin(anchor_local, anchor_world);
				(index, TransformKind::Scaling)
			}
			Gesture::Rotating {
				index,
				center,
				pointer_angle,
				start_angle,
			} => {
				let marker = self.markers.get_mut(index)?;
				marker.angle = start_angle + (p - center).angle() - pointer_angle;
				let local_center = Point::new(marker.width / 2.0, marker.height / 2.0);
				marker.pin(local_center, center);
				(index, TransformKind::Rotating)
			}
		};

		self.highlight_overlaps(index);
		let record = self.markers[index].sync_record().clone();
		trace!("{:?} node {} to ({}, {})", kind, record.i, record.x, record.y);
		Some(TransformEvent {
			kind,
			index,
			record,
		})
	}

	pub fn pointer_up(&mut self) {
		self.gesture = Gesture::Idle;
	}

	/// Dims every marker other than `target` that intersects it.
	pub fn highlight_overlaps(&mut self, target: usize) {
		let Some(quad) = self.markers.get(target).map(Marker::corners) else {
			return;
		};
		for (i, marker) in self.markers.iter_mut().enumerate() {
			if i == target {
				continue;
			}
			marker.opacity = if quads_intersect(&quad, &marker.corners()) {
				OVERLAP_OPACITY
			} else {
				NORMAL_OPACITY
			};
		}
	}

	/// CSS cursor for the pointer at `p`.
	pub fn cursor_at(&self, p: Point) -> &'static str {
		if matches!(self.gesture, Gesture::Moving { .. }) {
			return "move";
		}
		match self.control_at(p) {
			Some(Control::Rotate) => "crosshair",
			Some(Control::Corner(c)) if c % 2 == 0 => "nwse-resize",
			Some(Control::Corner(_)) => "nesw-resize",
			None if self.marker_at(p).is_some() => "move",
			None => "default",
		}
	}
}

#[cfg(test)]
mod tests {
	use std::f64::consts::FRAC_PI_2;

	use float_cmp::assert_approx_eq;

	use super::*;
	use crate::components::position_canvas::marker::FALLBACK_GLYPH_WIDTH;

	fn state_with(records: &[NodeRecord]) -> CanvasState {
		let mut state = CanvasState::new(1000.0, 700.0, 50.0);
		state.load(records, |label| label.len() as f64 * FALLBACK_GLYPH_WIDTH);
		state
	}

	fn two_nodes() -> CanvasState {
		state_with(&[NodeRecord::new(1, 0.0, 0.0), NodeRecord::new(2, 10_000.0, 10_000.0)])
	}

	fn assert_near(a: f64, b: f64) {
		assert_approx_eq!(f64, a, b, epsilon = 1e-9);
	}

	#[test]
	fn loaded_records_are_placed_in_pixels() {
		let state = two_nodes();
		assert_eq!(state.markers.len(), 2);
		assert_eq!((state.markers[0].left, state.markers[0].top), (0.0, 0.0));
		assert_eq!((state.markers[1].left, state.markers[1].top), (50.0, 50.0));
		assert_eq!(state.grid.len(), 20 + 14);
	}

	#[test]
	fn drag_emits_updated_record() {
		let mut state = two_nodes();
		state.pointer_down(Point::new(5.0, 5.0));
		assert_eq!(state.active, Some(0));

		let event = state.pointer_move(Point::new(105.0, 205.0)).unwrap();
		assert_eq!(event.kind, TransformKind::Moving);
		assert_eq!(event.index, 0);
		assert_eq!(event.record, NodeRecord::new(1, 20_000.0, 40_000.0));
		assert_eq!(state.markers[0].record, event.record);
	}

	#[test]
	fn no_event_without_gesture() {
		let mut state = two_nodes();
		assert!(state.pointer_move(Point::new(5.0, 5.0)).is_none());

		state.pointer_down(Point::new(5.0, 5.0));
		state.pointer_up();
		assert!(state.pointer_move(Point::new(50.0, 50.0)).is_none());
		assert_eq!(state.markers[0].left, 0.0);
	}

	#[test]
	fn overlap_dims_other_marker() {
		let mut state = two_nodes();
		state.pointer_down(Point::new(5.0, 5.0));

		state.pointer_move(Point::new(50.0, 50.0));
		assert_eq!(state.markers[1].opacity, OVERLAP_OPACITY);
		assert_eq!(state.markers[0].opacity, NORMAL_OPACITY);

		state.pointer_move(Point::new(305.0, 305.0));
		assert_eq!(state.markers[1].opacity, NORMAL_OPACITY);
	}

	#[test]
	fn reload_replaces_markers() {
		let mut state = two_nodes();
		state.pointer_down(Point::new(5.0, 5.0));
		state.load(&[NodeRecord::new(9, 1_000.0, 2_000.0)], |_| 9.0);

		assert_eq!(state.markers.len(), 1);
		assert_eq!(state.markers[0].record.i, 9);
		assert!(state.markers.iter().all(|m| m.record.i != 1 && m.record.i != 2));
		assert_eq!(state.active, None);
		assert!(matches!(state.gesture, Gesture::Idle));
	}

	#[test]
	fn press_on_empty_canvas_clears_selection() {
		let mut state = two_nodes();
		state.pointer_down(Point::new(5.0, 5.0));
		state.pointer_up();
		state.pointer_down(Point::new(900.0, 600.0));
		assert_eq!(state.active, None);
	}

	#[test]
	fn topmost_marker_wins() {
		let state = state_with(&[NodeRecord::new(1, 0.0, 0.0), NodeRecord::new(2, 0.0, 0.0)]);
		assert_eq!(state.marker_at(Point::new(5.0, 5.0)), Some(1));
		assert_eq!(state.marker_at(Point::new(500.0, 5.0)), None);
	}

	#[test]
	fn rotation_keeps_center() {
		let mut state = state_with(&[NodeRecord::new(1, 20_000.0, 20_000.0)]);
		state.pointer_down(Point::new(105.0, 105.0));
		state.pointer_up();

		let handle = state.controls(0).unwrap().rotate;
		assert_near(handle.x, 110.0);
		assert_near(handle.y, 60.0);
		state.pointer_down(handle);
		assert!(matches!(state.gesture, Gesture::Rotating { .. }));

		let event = state.pointer_move(Point::new(160.0, 110.0)).unwrap();
		assert_eq!(event.kind, TransformKind::Rotating);
		let marker = &state.markers[0];
		assert_near(marker.angle, FRAC_PI_2);
		assert_near(marker.center().x, 110.0);
		assert_near(marker.center().y, 110.0);
		assert_near(event.record.x, 24_000.0);
		assert_near(event.record.y, 20_000.0);
	}

	#[test]
	fn corner_scaling_keeps_opposite_corner() {
		let mut state = state_with(&[NodeRecord::new(1, 20_000.0, 20_000.0)]);
		state.pointer_down(Point::new(105.0, 105.0));
		state.pointer_up();

		assert_eq!(state.control_at(Point::new(121.0, 119.0)), Some(Control::Corner(2)));
		state.pointer_down(Point::new(120.0, 120.0));
		let event = state.pointer_move(Point::new(140.0, 140.0)).unwrap();
		assert_eq!(event.kind, TransformKind::Scaling);

		let marker = &state.markers[0];
		assert_near(marker.scale_x, 2.0);
		assert_near(marker.scale_y, 2.0);
		assert_eq!((marker.left, marker.top), (100.0, 100.0));
		let corner = marker.corners()[2];
		assert_near(corner.x, 140.0);
		assert_near(corner.y, 140.0);
	}

	#[test]
	fn scaling_is_clamped() {
		let mut state = state_with(&[NodeRecord::new(1, 20_000.0, 20_000.0)]);
		state.pointer_down(Point::new(105.0, 105.0));
		state.pointer_up();
		state.pointer_down(Point::new(100.0, 100.0));
		state.pointer_move(Point::new(150.0, 150.0));

		let marker = &state.markers[0];
		assert_near(marker.scale_x, MIN_SCALE);
		let corner = marker.corners()[2];
		assert_near(corner.x, 120.0);
		assert_near(corner.y, 120.0);
	}

	#[test]
	fn cursor_follows_hover() {
		let mut state = two_nodes();
		assert_eq!(state.cursor_at(Point::new(500.0, 500.0)), "default");
		assert_eq!(state.cursor_at(Point::new(55.0, 55.0)), "move");
		state.pointer_down(Point::new(55.0, 55.0));
		state.pointer_up();
		assert_eq!(state.cursor_at(Point::new(60.0, 10.0)), "crosshair");
		assert_eq!(state.cursor_at(Point::new(70.0, 50.0)), "nesw-resize");
	}

	#[test]
	fn drag_keeps_height() {
		let record = NodeRecord {
			h: Some(1500.0),
			..NodeRecord::new(4, 0.0, 0.0)
		};
		let mut state = state_with(&[record]);
		state.pointer_down(Point::new(5.0, 5.0));

		let event = state.pointer_move(Point::new(105.0, 205.0)).unwrap();
		assert_eq!(event.record.h, Some(1500.0));
		assert_eq!((event.record.x, event.record.y), (20_000.0, 40_000.0));
	}

	#[test]
	fn one_event_per_move_for_every_gesture() {
		let mut state = state_with(&[NodeRecord::new(1, 20_000.0, 20_000.0)]);
		let steps = [Point::new(130.0, 130.0), Point::new(135.0, 131.0), Point::new(140.0, 140.0)];

		// Moving.
		state.pointer_down(Point::new(105.0, 105.0));
		let moves: Vec<_> = steps.iter().filter_map(|&p| state.pointer_move(p)).collect();
		assert_eq!(moves.len(), steps.len());
		assert!(moves.iter().all(|e| e.kind == TransformKind::Moving && e.index == 0));
		state.pointer_up();

		// Scaling from the bottom-right corner.
		let corner = state.controls(0).unwrap().corners[2];
		state.pointer_down(corner);
		let scales: Vec<_> = steps
			.iter()
			.filter_map(|&p| state.pointer_move(p + Point::new(100.0, 100.0)))
			.collect();
		assert_eq!(scales.len(), steps.len());
		assert!(scales.iter().all(|e| e.kind == TransformKind::Scaling));
		state.pointer_up();

		// Rotating.
		let handle = state.controls(0).unwrap().rotate;
		state.pointer_down(handle);
		let turns: Vec<_> = steps.iter().filter_map(|&p| state.pointer_move(p)).collect();
		assert_eq!(turns.len(), steps.len());
		assert!(turns.iter().all(|e| e.kind == TransformKind::Rotating));
		state.pointer_up();

		assert!(state.pointer_move(Point::new(0.0, 0.0)).is_none());
	}
}
