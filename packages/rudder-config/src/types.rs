use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub providers: Providers,
	#[serde(default)]
	pub routing: Routing,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub retrieval: ProviderConfig,
	pub completion: LlmProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Routing {
	/// Retrieval candidates examined per relevance decision.
	#[serde(default = "default_top_k")]
	pub top_k: u32,
	/// Characters of the best fragment quoted into the selection prompt.
	#[serde(default = "default_snippet_chars")]
	pub snippet_chars: u32,
	/// Advisory prompt threshold below which the action tool is suggested.
	#[serde(default = "default_relevance_floor")]
	pub relevance_floor: f32,
	/// Advisory prompt threshold above which the search tool is suggested.
	#[serde(default = "default_search_hint_threshold")]
	pub search_hint_threshold: f32,
}
impl Default for Routing {
	fn default() -> Self {
		Self {
			top_k: default_top_k(),
			snippet_chars: default_snippet_chars(),
			relevance_floor: default_relevance_floor(),
			search_hint_threshold: default_search_hint_threshold(),
		}
	}
}

fn default_top_k() -> u32 {
	3
}

fn default_snippet_chars() -> u32 {
	200
}

fn default_relevance_floor() -> f32 {
	0.15
}

fn default_search_hint_threshold() -> f32 {
	0.3
}
