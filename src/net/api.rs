//! HTTP calls to the position backend.
//!
//! Both endpoints are resolved relative to the page URL, so the app is served
//! from the same origin that exposes `list` and `set`.

use gloo_net::http::Request;
use thiserror::Error;

use crate::components::position_canvas::NodeRecord;

/// Returns the current position of every node.
pub const LIST_ENDPOINT: &str = "list";
/// Accepts one updated node position.
pub const SET_ENDPOINT: &str = "set";

/// Failures talking to the backend. Messages are kept as strings so results
/// can sit in a resource and be cloned.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ApiError {
	#[error("request failed: {0}")]
	Request(String),
	#[error("unexpected status {0}")]
	Status(u16),
	#[error("could not encode body: {0}")]
	Encode(String),
}

impl From<gloo_net::Error> for ApiError {
	fn from(err: gloo_net::Error) -> Self {
		ApiError::Request(err.to_string())
	}
}

impl From<serde_json::Error> for ApiError {
	fn from(err: serde_json::Error) -> Self {
		ApiError::Encode(err.to_string())
	}
}

/// `GET list`, decoded as an ordered list of records.
pub async fn fetch_positions() -> Result<Vec<NodeRecord>, ApiError> {
	let resp = Request::get(LIST_ENDPOINT).send().await?;
	if !resp.ok() {
		return Err(ApiError::Status(resp.status()));
	}
	Ok(resp.json::<Vec<NodeRecord>>().await?)
}

/// `POST set` with the record as a JSON body. The response body is ignored.
pub async fn post_position(record: &NodeRecord) -> Result<(), ApiError> {
	let body = serde_json::to_string(record)?;
	let resp = Request::post(SET_ENDPOINT)
		.header("Content-Type", "application/json")
		.body(body)?
		.send()
		.await?;
	if !resp.ok() {
		return Err(ApiError::Status(resp.status()));
	}
	Ok(())
}
