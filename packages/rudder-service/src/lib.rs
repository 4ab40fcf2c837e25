pub mod error;
pub mod executor;
pub mod graph;
pub mod merge;
pub mod scorer;
pub mod selector;
pub mod tools;

use std::{future::Future, pin::Pin, sync::Arc};

pub use error::{Error, Result};
pub use executor::RoutedResponse;
pub use tools::{ACTION_PLACEHOLDER, ActionStub, ToolChoice, default_catalog};

use rudder_config::{Config, LlmProviderConfig, ProviderConfig};
use rudder_domain::{Fragment, RouteLabel};
use rudder_providers::{completion, retrieval};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// External retrieval index. Read-only per call; an empty result list is a
/// valid outcome, not an error.
pub trait RetrievalProvider
where
	Self: Send + Sync,
{
	fn retrieve<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
		top_k: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Fragment>>>;
}

/// External completion service; one prompt in, one text reply out.
pub trait CompletionProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>>;
}

/// Answer-producing collaborator behind one route label.
pub trait AnsweringTool
where
	Self: Send + Sync,
{
	fn answer<'a>(&'a self, query: &'a str) -> BoxFuture<'a, color_eyre::Result<String>>;
}

#[derive(Clone)]
pub struct Providers {
	pub retrieval: Arc<dyn RetrievalProvider>,
	pub completion: Arc<dyn CompletionProvider>,
}
impl Providers {
	/// HTTP-backed collaborators from `rudder-providers`.
	pub fn default_http() -> Self {
		Self { retrieval: Arc::new(DefaultProviders), completion: Arc::new(DefaultProviders) }
	}
}

#[derive(Clone)]
pub struct Tools {
	pub summary: Arc<dyn AnsweringTool>,
	pub search: Arc<dyn AnsweringTool>,
	pub action: Arc<dyn AnsweringTool>,
}
impl Tools {
	pub fn get(&self, route: RouteLabel) -> &Arc<dyn AnsweringTool> {
		match route {
			RouteLabel::Summary => &self.summary,
			RouteLabel::Search => &self.search,
			RouteLabel::Action => &self.action,
		}
	}
}

pub struct RudderService {
	pub cfg: Config,
	pub providers: Providers,
	pub tools: Tools,
	pub catalog: Vec<ToolChoice>,
}
impl RudderService {
	pub fn new(cfg: Config, providers: Providers, tools: Tools) -> Self {
		Self { cfg, providers, tools, catalog: default_catalog() }
	}

	pub fn with_default_providers(cfg: Config, tools: Tools) -> Self {
		Self::new(cfg, Providers::default_http(), tools)
	}
}

struct DefaultProviders;
impl RetrievalProvider for DefaultProviders {
	fn retrieve<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
		top_k: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Fragment>>> {
		Box::pin(retrieval::retrieve(cfg, query, top_k))
	}
}
impl CompletionProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(completion::complete(cfg, prompt))
	}
}
