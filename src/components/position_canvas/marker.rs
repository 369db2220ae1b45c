use super::geometry::{Point, Quad};
use super::scale::{mm2pix, pix2mm};
use super::types::NodeRecord;

/// Fill colors handed out to markers in load order.
pub const PALETTE: &[&str] = &["#ffcc00", "#ccff00", "#00ccff", "#ff0000", "#ffff00"];

pub const MARKER_RADIUS: f64 = 10.0;
pub const LABEL_FONT_SIZE: f64 = 16.0;
pub const LABEL_LINE_HEIGHT: f64 = 1.16;
pub const LABEL_FONT: &str = "16px sans-serif";
/// Per-character label width used when the canvas cannot measure text.
pub const FALLBACK_GLYPH_WIDTH: f64 = 9.0;
pub const LABEL_COLOR: &str = "black";

pub const NORMAL_OPACITY: f64 = 1.0;
pub const OVERLAP_OPACITY: f64 = 0.5;

/// A labelled circle standing in for one record. `left`/`top` is the
/// marker's rotated top-left corner in canvas pixels.
#[derive(Clone, Debug)]
pub struct Marker {
	pub record: NodeRecord,
	pub label: String,
	pub color: &'static str,
	pub left: f64,
	pub top: f64,
	/// Radians, clockwise.
	pub angle: f64,
	pub scale_x: f64,
	pub scale_y: f64,
	/// Unscaled box size.
	pub width: f64,
	pub height: f64,
	pub opacity: f64,
}

impl Marker {
	pub fn new(record: NodeRecord, index: usize, label_width: f64) -> Self {
		let label = record.i.to_string();
		let diameter = MARKER_RADIUS * 2.0;
		Self {
			left: mm2pix(record.x),
			top: mm2pix(record.y),
			label,
			color: PALETTE[index % PALETTE.len()],
			angle: 0.0,
			scale_x: 1.0,
			scale_y: 1.0,
			width: diameter.max(label_width),
			height: diameter.max(LABEL_FONT_SIZE * LABEL_LINE_HEIGHT),
			opacity: NORMAL_OPACITY,
			record,
		}
	}

	pub fn origin(&self) -> Point {
		Point::new(self.left, self.top)
	}

	/// Maps a point in the marker's unscaled box to canvas pixels.
	pub fn to_world(&self, local: Point) -> Point {
		self.origin() + local.scaled(self.scale_x, self.scale_y).rotated(self.angle)
	}

	pub fn to_local(&self, world: Point) -> Point {
		(world - self.origin())
			.rotated(-self.angle)
			.scaled(1.0 / self.scale_x, 1.0 / self.scale_y)
	}

	pub fn center(&self) -> Point {
		self.to_world(Point::new(self.width / 2.0, self.height / 2.0))
	}

	/// Corners clockwise from the origin.
	pub fn corners(&self) -> Quad {
		[
			Point::new(0.0, 0.0),
			Point::new(self.width, 0.0),
			Point::new(self.width, self.height),
			Point::new(0.0, self.height),
		]
		.map(|p| self.to_world(p))
	}

	pub fn contains(&self, world: Point) -> bool {
		let p = self.to_local(world);
		(0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
	}

	/// Places the origin so that local point `local` lands on `world`.
	pub fn pin(&mut self, local: Point, world: Point) {
		let origin = world - local.scaled(self.scale_x, self.scale_y).rotated(self.angle);
		self.left = origin.x;
		self.top = origin.y;
	}

	/// Writes the current origin back into the record.
	pub fn sync_record(&mut self) -> &NodeRecord {
		self.record.x = pix2mm(self.left);
		self.record.y = pix2mm(self.top);
		&self.record
	}
}
