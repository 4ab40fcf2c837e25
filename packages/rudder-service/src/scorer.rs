use rudder_domain::{Fragment, RelevanceEvidence};

use crate::{Error, Result, RudderService};

impl RudderService {
	/// Computes how relevant the indexed corpus is to `query`: the maximum
	/// similarity among the top-K retrieved fragments plus a snippet of the
	/// best one. Zero candidates score 0.0 with an empty snippet.
	pub async fn score(&self, query: &str) -> Result<RelevanceEvidence> {
		let fragments = self
			.providers
			.retrieval
			.retrieve(&self.cfg.providers.retrieval, query, self.cfg.routing.top_k)
			.await
			.map_err(|err| Error::Provider { message: err.to_string() })?;
		let evidence = evidence_from(&fragments, self.cfg.routing.snippet_chars);

		tracing::info!(
			score = evidence.score,
			candidates = evidence.candidate_count,
			"Document relevance scored."
		);

		Ok(evidence)
	}
}

fn evidence_from(fragments: &[Fragment], snippet_chars: u32) -> RelevanceEvidence {
	// Strictly-greater comparison keeps the first fragment on ties, matching
	// retrieval order.
	let Some(best) = fragments.iter().reduce(|best, fragment| {
		if fragment.similarity > best.similarity { fragment } else { best }
	}) else {
		return RelevanceEvidence::absent();
	};

	RelevanceEvidence {
		score: best.similarity,
		top_snippet: snippet_of(&best.text, snippet_chars),
		candidate_count: fragments.len(),
	}
}

fn snippet_of(text: &str, max_chars: u32) -> String {
	text.chars().take(max_chars as usize).collect()
}
