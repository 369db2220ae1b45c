use serde::{Deserialize, Serialize};

/// A node position as exchanged with the backend. Coordinates are millimeters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
	#[serde(rename = "I")]
	pub i: i64,
	#[serde(rename = "X")]
	pub x: f64,
	#[serde(rename = "Y")]
	pub y: f64,
	/// Height, passed through untouched when the backend reports one.
	#[serde(rename = "H", default, skip_serializing_if = "Option::is_none")]
	pub h: Option<f64>,
}

#[cfg(test)]
impl NodeRecord {
	pub fn new(i: i64, x: f64, y: f64) -> Self {
		Self { i, x, y, h: None }
	}
}
