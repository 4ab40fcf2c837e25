/// Substituted for the result whenever the merge stage rejects it.
pub const FALLBACK_ANSWER: &str = "Sorry, I couldn't find a meaningful answer to your query.";

const INVALID_ANSWERS: [&str; 3] = ["n/a", "none", "no result found"];

/// A result is invalid when it trims to nothing or to a boilerplate negative.
pub fn is_invalid_answer(result: &str) -> bool {
	let trimmed = result.trim();

	trimmed.is_empty() || INVALID_ANSWERS.iter().any(|bad| trimmed.eq_ignore_ascii_case(bad))
}
