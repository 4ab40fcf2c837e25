//! Scripted in-memory collaborators for exercising the routing core without
//! live retrieval or completion services.

use std::sync::{
	Mutex,
	atomic::{AtomicUsize, Ordering},
};

use color_eyre::eyre;

use rudder_config::{LlmProviderConfig, ProviderConfig};
use rudder_domain::Fragment;
use rudder_service::{AnsweringTool, BoxFuture, CompletionProvider, RetrievalProvider};

/// Retrieval collaborator that always serves the same fragment list,
/// truncated to the requested top-K.
pub struct ScriptedRetrieval {
	fragments: Vec<Fragment>,
}
impl ScriptedRetrieval {
	pub fn new(fragments: Vec<Fragment>) -> Self {
		Self { fragments }
	}

	pub fn empty() -> Self {
		Self { fragments: Vec::new() }
	}

	pub fn single(text: &str, similarity: f32) -> Self {
		Self::new(vec![Fragment { text: text.to_string(), similarity }])
	}
}
impl RetrievalProvider for ScriptedRetrieval {
	fn retrieve<'a>(
		&'a self,
		_cfg: &'a ProviderConfig,
		_query: &'a str,
		top_k: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Fragment>>> {
		let fragments = self.fragments.iter().take(top_k as usize).cloned().collect();

		Box::pin(async move { Ok(fragments) })
	}
}

/// Completion collaborator replaying canned replies in order, repeating the
/// last one once the script runs out. Counts calls so tests can assert the
/// prompt was actually submitted.
pub struct ScriptedCompletion {
	replies: Mutex<Vec<String>>,
	cursor: AtomicUsize,
}
impl ScriptedCompletion {
	pub fn sequence(replies: &[&str]) -> Self {
		Self {
			replies: Mutex::new(replies.iter().map(|reply| reply.to_string()).collect()),
			cursor: AtomicUsize::new(0),
		}
	}

	pub fn fixed(reply: &str) -> Self {
		Self::sequence(&[reply])
	}

	pub fn calls(&self) -> usize {
		self.cursor.load(Ordering::SeqCst)
	}
}
impl CompletionProvider for ScriptedCompletion {
	fn complete<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		_prompt: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		let index = self.cursor.fetch_add(1, Ordering::SeqCst);
		let replies = self.replies.lock().unwrap_or_else(|err| err.into_inner());
		let reply = replies
			.get(index)
			.or_else(|| replies.last())
			.cloned()
			.unwrap_or_default();

		Box::pin(async move { Ok(reply) })
	}
}

/// Completion collaborator simulating an unreachable service.
pub struct FailingCompletion;
impl CompletionProvider for FailingCompletion {
	fn complete<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		_prompt: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(async { Err(eyre::eyre!("Completion service unavailable.")) })
	}
}

/// Answering tool with a fixed reply.
pub struct StaticTool {
	reply: String,
}
impl StaticTool {
	pub fn new(reply: &str) -> Self {
		Self { reply: reply.to_string() }
	}
}
impl AnsweringTool for StaticTool {
	fn answer<'a>(&'a self, _query: &'a str) -> BoxFuture<'a, color_eyre::Result<String>> {
		let reply = self.reply.clone();

		Box::pin(async move { Ok(reply) })
	}
}
