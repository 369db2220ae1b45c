use std::ops::{Add, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn scaled(self, sx: f64, sy: f64) -> Self {
		Self::new(self.x * sx, self.y * sy)
	}

	/// Rotates about the origin by `angle` radians (clockwise on screen).
	pub fn rotated(self, angle: f64) -> Self {
		let (sin, cos) = angle.sin_cos();
		Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
	}

	pub fn dot(self, other: Self) -> f64 {
		self.x * other.x + self.y * other.y
	}

	pub fn angle(self) -> f64 {
		self.y.atan2(self.x)
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

/// Corners of an oriented rectangle, in drawing order.
pub type Quad = [Point; 4];

fn project(quad: &Quad, axis: Point) -> (f64, f64) {
	quad.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
		let d = p.dot(axis);
		(lo.min(d), hi.max(d))
	})
}

/// Separating-axis test for two convex quads. Touching edges and full
/// containment both count as intersecting.
pub fn quads_intersect(a: &Quad, b: &Quad) -> bool {
	for quad in [a, b] {
		for i in 0..4 {
			let edge = quad[(i + 1) % 4] - quad[i];
			let axis = Point::new(-edge.y, edge.x);
			if axis.dot(axis) == 0.0 {
				continue;
			}
			let (a_lo, a_hi) = project(a, axis);
			let (b_lo, b_hi) = project(b, axis);
			if a_hi < b_lo || b_hi < a_lo {
				return false;
			}
		}
	}
	true
}
