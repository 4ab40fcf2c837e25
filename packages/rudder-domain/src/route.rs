use serde::{Deserialize, Serialize};

/// Closed set of routing outcomes. Dispatch over this enum is exhaustive, so a
/// new route cannot silently fall through unhandled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteLabel {
	#[serde(rename = "summary_tool")]
	Summary,
	#[serde(rename = "search_tool")]
	Search,
	#[serde(rename = "action_tool")]
	Action,
}

/// Catalog order is fixed: selector replies index into this table.
pub const ROUTE_TABLE: [RouteLabel; 3] =
	[RouteLabel::Summary, RouteLabel::Search, RouteLabel::Action];

impl RouteLabel {
	pub fn from_index(index: usize) -> Option<Self> {
		ROUTE_TABLE.get(index).copied()
	}

	pub fn index(self) -> usize {
		match self {
			Self::Summary => 0,
			Self::Search => 1,
			Self::Action => 2,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Summary => "summary_tool",
			Self::Search => "search_tool",
			Self::Action => "action_tool",
		}
	}
}
impl std::fmt::Display for RouteLabel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
