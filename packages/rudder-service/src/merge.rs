use rudder_domain::{ExecutionState, FALLBACK_ANSWER, is_invalid_answer};

/// Terminal quality gate: an empty or boilerplate-negative result is replaced
/// by the fixed fallback answer. Never fails; always yields a usable result.
pub fn merge_node(state: ExecutionState) -> ExecutionState {
	if is_invalid_answer(&state.result) {
		tracing::warn!("Merge node: empty or invalid result.");

		return state.with_result(FALLBACK_ANSWER.to_string());
	}

	tracing::info!("Merge node: result passed validation.");

	state
}

#[cfg(test)]
mod tests {
	use rudder_domain::RouteLabel;

	use super::*;

	#[test]
	fn invalid_results_become_the_fallback_answer() {
		for bad in ["", "   ", "n/a", "None", "NO RESULT FOUND"] {
			let state = ExecutionState::new("q").routed(RouteLabel::Search, bad.to_string());
			let merged = merge_node(state);

			assert_eq!(merged.result, FALLBACK_ANSWER);
			assert_eq!(merged.route, Some(RouteLabel::Search));
		}
	}

	#[test]
	fn valid_results_pass_through_unchanged() {
		let state =
			ExecutionState::new("q").routed(RouteLabel::Summary, "A real answer.".to_string());
		let merged = merge_node(state.clone());

		assert_eq!(merged, state);
	}
}
