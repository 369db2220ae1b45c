use log::debug;

/// Stroke color of the reference grid.
pub const GRID_STROKE: &str = "#999";
/// Opacity of the reference grid.
pub const GRID_OPACITY: f64 = 0.5;

/// One background grid segment, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

/// Number of lines needed along a dimension so the grid covers it.
pub fn line_count(dimension: f64, spacing: f64) -> usize {
	if spacing <= 0.0 || dimension <= 0.0 {
		return 0;
	}
	(dimension / spacing).ceil() as usize
}

/// Vertical lines first, then horizontal, each starting at the canvas edge.
pub fn grid_lines(width: f64, height: f64, spacing: f64) -> Vec<GridLine> {
	debug!("{}:{}", width, height);

	let vertical = (0..line_count(width, spacing)).map(|i| {
		let x = i as f64 * spacing;
		GridLine {
			x1: x,
			y1: 0.0,
			x2: x,
			y2: height,
		}
	});
	let horizontal = (0..line_count(height, spacing)).map(|i| {
		let y = i as f64 * spacing;
		GridLine {
			x1: 0.0,
			y1: y,
			x2: width,
			y2: y,
		}
	});
	vertical.chain(horizontal).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn count_rounds_up() {
		assert_eq!(line_count(1000.0, 50.0), 20);
		assert_eq!(line_count(700.0, 50.0), 14);
		assert_eq!(line_count(710.0, 50.0), 15);
		assert_eq!(line_count(1.0, 50.0), 1);
	}

	#[test]
	fn degenerate_inputs_have_no_lines() {
		assert_eq!(line_count(0.0, 50.0), 0);
		assert_eq!(line_count(100.0, 0.0), 0);
		assert!(grid_lines(100.0, 100.0, -5.0).is_empty());
	}

	#[test]
	fn default_canvas_grid() {
		let lines = grid_lines(1000.0, 700.0, 50.0);
		assert_eq!(lines.len(), 20 + 14);

		let vertical: Vec<_> = lines.iter().filter(|l| l.x1 == l.x2).collect();
		assert_eq!(vertical.len(), 20);
		assert!(vertical.iter().all(|l| l.y1 == 0.0 && l.y2 == 700.0));
		assert_eq!(vertical[3].x1, 150.0);

		let last = lines.last().unwrap();
		assert_eq!(*last, GridLine { x1: 0.0, y1: 650.0, x2: 1000.0, y2: 650.0 });
	}
}
