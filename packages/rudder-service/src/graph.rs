use rudder_domain::{ExecutionState, RouteLabel};
use uuid::Uuid;

use crate::{Result, RudderService, merge::merge_node};

/// Nodes of the execution graph. One cycle visits `Tool`, optionally
/// `Action`, then `Merge`; no node twice, no edges back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
	Tool,
	Action,
	Merge,
}

impl RudderService {
	/// Drives one query through the graph from the initial state to the
	/// terminal merge node. Decision-quality failures are absorbed by the
	/// fallbacks inside the tool node; collaborator failures abort the cycle.
	pub async fn run_cycle(&self, query: &str) -> Result<ExecutionState> {
		let trace_id = Uuid::new_v4();

		tracing::info!(%trace_id, query, "Execution cycle started.");

		let mut state = ExecutionState::new(query);
		let mut node = Node::Tool;

		loop {
			match node {
				Node::Tool => {
					state = self.tool_node(state).await?;
					node = next_after_tool(&state);
				},
				Node::Action => {
					state = action_node(state);
					node = Node::Merge;
				},
				Node::Merge => {
					state = merge_node(state);

					break;
				},
			}
		}

		tracing::info!(%trace_id, route = ?state.route, "Execution cycle finished.");

		Ok(state)
	}

	async fn tool_node(&self, state: ExecutionState) -> Result<ExecutionState> {
		let (result, route) = self.execute(&state.query).await?;

		Ok(state.routed(route, result))
	}
}

/// Conditional edge after the tool node: only the action route detours
/// through the action node.
pub(crate) fn next_after_tool(state: &ExecutionState) -> Node {
	match state.route {
		Some(RouteLabel::Action) => Node::Action,
		Some(RouteLabel::Summary) | Some(RouteLabel::Search) => Node::Merge,
		// The tool node always sets the route; an unset route still
		// terminates at merge, where the empty result is replaced.
		None => Node::Merge,
	}
}

/// Identity transform standing in for an external side-effecting API call.
pub(crate) fn action_node(state: ExecutionState) -> ExecutionState {
	state
}
