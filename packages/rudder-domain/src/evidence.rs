use serde::{Deserialize, Serialize};

/// One retrieved context fragment with its similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
	pub text: String,
	pub similarity: f32,
}

/// Relevance of a query to the indexed corpus, computed fresh per routing
/// decision and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceEvidence {
	pub score: f32,
	pub top_snippet: String,
	pub candidate_count: usize,
}
impl RelevanceEvidence {
	/// Zero retrieval candidates is a valid outcome, not an error.
	pub fn absent() -> Self {
		Self { score: 0.0, top_snippet: String::new(), candidate_count: 0 }
	}
}

/// The selector's raw, catalog-indexed choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
	pub index: usize,
	pub reason: String,
}
