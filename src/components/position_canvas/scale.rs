//! Millimeter/pixel conversions for the floor-plan scale.

/// Canvas pixels per meter of floor plan.
pub const PIXELS_PER_METER: f64 = 5.0;

/// Meters to canvas pixels.
pub fn m2pix(m: f64) -> f64 {
	m * PIXELS_PER_METER
}

/// Millimeters to canvas pixels.
pub fn mm2pix(mm: f64) -> f64 {
	m2pix(mm / 1000.0)
}

/// Canvas pixels to millimeters.
pub fn pix2mm(pix: f64) -> f64 {
	pix * 1000.0 / PIXELS_PER_METER
}
