use crate::{AnsweringTool, BoxFuture};

/// Fixed reply of the baseline action stub.
pub const ACTION_PLACEHOLDER: &str = "Dummy action triggered";

/// One enumerated tool the selector can pick. Catalog order is the route
/// table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolChoice {
	pub name: String,
	pub description: String,
}
impl ToolChoice {
	fn new(name: &str, description: &str) -> Self {
		Self { name: name.to_string(), description: description.to_string() }
	}
}

pub fn default_catalog() -> Vec<ToolChoice> {
	vec![
		ToolChoice::new(
			"summary_tool",
			"Summarizes the entire document. Use for high-level understanding.",
		),
		ToolChoice::new(
			"search_tool",
			"If the query can be answered by searching the document, use this tool. If the query \
			 is out of scope of the document, use the action tool.",
		),
		ToolChoice::new(
			"action_tool",
			"Handles queries that cannot be answered by the summary or search tool.",
		),
	]
}

/// Baseline action tool: a no-op placeholder until a real side-effecting API
/// integration is swapped in.
pub struct ActionStub;
impl AnsweringTool for ActionStub {
	fn answer<'a>(&'a self, _query: &'a str) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(async { Ok(ACTION_PLACEHOLDER.to_string()) })
	}
}
