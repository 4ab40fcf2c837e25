use serde::{Deserialize, Serialize};

use crate::route::RouteLabel;

/// State threaded through one execution cycle. Each graph node returns a new
/// value merging its own updates over the previous state; fields a node did
/// not touch are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionState {
	pub query: String,
	pub route: Option<RouteLabel>,
	pub result: String,
}
impl ExecutionState {
	pub fn new(query: impl Into<String>) -> Self {
		Self { query: query.into(), route: None, result: String::new() }
	}

	pub fn routed(self, route: RouteLabel, result: String) -> Self {
		Self { route: Some(route), result, ..self }
	}

	pub fn with_result(self, result: String) -> Self {
		Self { result, ..self }
	}
}
