use std::fmt::Write;

use rudder_domain::{RelevanceEvidence, Selection};

use crate::{Error, Result, RudderService, ToolChoice};

/// Reason attached to every decision-quality fallback.
pub const FALLBACK_REASON: &str = "Fallback to search tool";

const FALLBACK_INDEX: usize = 1;

impl RudderService {
	/// Asks the completion service to pick a tool index for `query` given the
	/// relevance evidence. The stated thresholds are advisory prompt text;
	/// the service's literal numeric reply governs the outcome. Any reply
	/// that fails to parse as an in-catalog integer falls back to the search
	/// index — this path never returns an error. A completion transport
	/// failure is an infrastructure failure and propagates.
	pub async fn select(
		&self,
		query: &str,
		evidence: &RelevanceEvidence,
		catalog: &[ToolChoice],
	) -> Result<Selection> {
		let prompt = build_selection_prompt(
			query,
			evidence,
			catalog,
			self.cfg.routing.relevance_floor,
			self.cfg.routing.search_hint_threshold,
		);
		let reply = self
			.providers
			.completion
			.complete(&self.cfg.providers.completion, &prompt)
			.await
			.map_err(|err| Error::Provider { message: err.to_string() })?;

		tracing::info!(reply = reply.as_str(), "Tool selection reply received.");

		Ok(parse_selection(&reply, catalog.len(), evidence.score))
	}
}

pub(crate) fn build_selection_prompt(
	query: &str,
	evidence: &RelevanceEvidence,
	catalog: &[ToolChoice],
	relevance_floor: f32,
	search_hint_threshold: f32,
) -> String {
	let mut prompt = String::new();
	let _ = writeln!(
		prompt,
		"Based on the query and document context, select the most appropriate tool:"
	);
	let _ = writeln!(prompt);
	let _ = writeln!(prompt, "Query: {query}");
	let _ = writeln!(prompt, "Document relevance: {}", evidence.score);
	if evidence.candidate_count > 0 {
		let _ = writeln!(prompt, "Top relevant content: {}...", evidence.top_snippet);
	}
	let _ = writeln!(prompt);
	let _ = writeln!(prompt, "Available tools:");
	for (index, choice) in catalog.iter().enumerate() {
		let _ = writeln!(prompt, "{index}: {} - {}", choice.name, choice.description);
	}
	let _ = writeln!(prompt);
	let _ = writeln!(prompt, "Rules:");
	let _ = writeln!(
		prompt,
		"- If the query is moderately relevant to the document and asks for an overview or \
		 summary, reply 0 (summary_tool)."
	);
	let _ = writeln!(
		prompt,
		"- If the query is highly relevant (relevance score > {search_hint_threshold}) to the \
		 given content and asks for specific details, reply 1 (search_tool)."
	);
	let _ = writeln!(
		prompt,
		"- If the query is NOT relevant (relevance score < {relevance_floor}) to the document, \
		 reply 2 (action_tool)."
	);
	let _ = writeln!(prompt);
	let _ = write!(prompt, "Return only the tool index (0, 1, or 2) without any other text.");

	prompt
}

/// Deterministic fallback policy: anything that is not an integer inside the
/// catalog resolves to the search index, the least destructive default.
pub(crate) fn parse_selection(reply: &str, catalog_len: usize, score: f32) -> Selection {
	match reply.trim().parse::<usize>() {
		Ok(index) if index < catalog_len => Selection {
			index,
			reason: format!("Selected based on document relevance: {score}"),
		},
		_ => Selection { index: FALLBACK_INDEX, reason: FALLBACK_REASON.to_string() },
	}
}
