pub mod answer_gate;
pub mod evidence;
pub mod route;
pub mod state;

pub use answer_gate::{FALLBACK_ANSWER, is_invalid_answer};
pub use evidence::{Fragment, RelevanceEvidence, Selection};
pub use route::RouteLabel;
pub use state::ExecutionState;
