use std::sync::Arc;

use rudder_config::{
	Config, LlmProviderConfig, ProviderConfig, Providers as ProviderSettings, Routing, Service,
};
use rudder_domain::{FALLBACK_ANSWER, Fragment, RouteLabel};
use rudder_service::{
	ACTION_PLACEHOLDER, ActionStub, Error, Providers, RudderService, Tools,
};
use rudder_testkit::{FailingCompletion, ScriptedCompletion, ScriptedRetrieval, StaticTool};

fn dummy_provider() -> ProviderConfig {
	ProviderConfig {
		provider_id: "p".to_string(),
		api_base: "http://localhost".to_string(),
		api_key: "key".to_string(),
		path: "/".to_string(),
		model: "m".to_string(),
		timeout_ms: 1_000,
		default_headers: serde_json::Map::new(),
	}
}

fn dummy_llm_provider() -> LlmProviderConfig {
	LlmProviderConfig {
		provider_id: "p".to_string(),
		api_base: "http://localhost".to_string(),
		api_key: "key".to_string(),
		path: "/".to_string(),
		model: "m".to_string(),
		temperature: 0.0,
		timeout_ms: 1_000,
		default_headers: serde_json::Map::new(),
	}
}

fn test_config() -> Config {
	Config {
		service: Service { log_level: "info".to_string() },
		providers: ProviderSettings {
			retrieval: dummy_provider(),
			completion: dummy_llm_provider(),
		},
		routing: Routing::default(),
	}
}

fn service(
	retrieval: ScriptedRetrieval,
	completion: impl rudder_service::CompletionProvider + 'static,
	summary_reply: &str,
	search_reply: &str,
) -> RudderService {
	let providers =
		Providers { retrieval: Arc::new(retrieval), completion: Arc::new(completion) };
	let tools = Tools {
		summary: Arc::new(StaticTool::new(summary_reply)),
		search: Arc::new(StaticTool::new(search_reply)),
		action: Arc::new(ActionStub),
	};

	RudderService::new(test_config(), providers, tools)
}

fn paper_fragments() -> Vec<Fragment> {
	vec![
		Fragment { text: "The paper evaluates four datasets.".to_string(), similarity: 0.62 },
		Fragment { text: "Introduction and motivation.".to_string(), similarity: 0.41 },
		Fragment { text: "Related work overview.".to_string(), similarity: 0.33 },
	]
}

#[tokio::test]
async fn low_relevance_query_routes_to_action_stub() {
	let svc = service(
		ScriptedRetrieval::single("unrelated content", 0.02),
		ScriptedCompletion::fixed("2"),
		"summary answer",
		"search answer",
	);
	let state = svc.run_cycle("Where is Georgia Tech located?").await.expect("cycle failed");

	assert_eq!(state.route, Some(RouteLabel::Action));
	assert_eq!(state.result, ACTION_PLACEHOLDER);
}

#[tokio::test]
async fn overview_query_routes_to_summary() {
	let svc = service(
		ScriptedRetrieval::new(paper_fragments()),
		ScriptedCompletion::fixed("0"),
		"The document proposes a routing agent for document QA.",
		"search answer",
	);
	let state =
		svc.run_cycle("What is the main idea of the document?").await.expect("cycle failed");

	assert_eq!(state.route, Some(RouteLabel::Summary));
	assert_eq!(state.result, "The document proposes a routing agent for document QA.");
}

#[tokio::test]
async fn detail_query_routes_to_search() {
	let svc = service(
		ScriptedRetrieval::new(paper_fragments()),
		ScriptedCompletion::fixed("1"),
		"summary answer",
		"The author used four datasets.",
	);
	let state =
		svc.run_cycle("How many datasets did the author use?").await.expect("cycle failed");

	assert_eq!(state.route, Some(RouteLabel::Search));
	assert_eq!(state.result, "The author used four datasets.");
}

#[tokio::test]
async fn malformed_selector_reply_falls_back_to_search() {
	let svc = service(
		ScriptedRetrieval::new(paper_fragments()),
		ScriptedCompletion::fixed("banana"),
		"summary answer",
		"search answer",
	);
	let state = svc.run_cycle("Anything at all?").await.expect("cycle failed");

	assert_eq!(state.route, Some(RouteLabel::Search));
	assert_eq!(state.result, "search answer");
}

#[tokio::test]
async fn out_of_range_selector_reply_falls_back_to_search() {
	let svc = service(
		ScriptedRetrieval::new(paper_fragments()),
		ScriptedCompletion::fixed("7"),
		"summary answer",
		"search answer",
	);
	let state = svc.run_cycle("Anything at all?").await.expect("cycle failed");

	assert_eq!(state.route, Some(RouteLabel::Search));
}

#[tokio::test]
async fn route_is_always_typed_after_the_tool_stage() {
	for reply in ["0", "1", "2", "banana", "9", ""] {
		let svc = service(
			ScriptedRetrieval::new(paper_fragments()),
			ScriptedCompletion::fixed(reply),
			"summary answer",
			"search answer",
		);
		let state = svc.run_cycle("query").await.expect("cycle failed");
		let route = state.route.expect("route must be set after the tool stage");

		assert!(RouteLabel::from_index(route.index()).is_some());
	}
}

#[tokio::test]
async fn zero_retrieval_fragments_still_complete_the_cycle() {
	let completion = ScriptedCompletion::fixed("2");
	let svc = service(ScriptedRetrieval::empty(), completion, "summary", "search");

	let evidence = svc.score("Where is Georgia Tech located?").await.expect("score failed");

	assert_eq!(evidence.score, 0.0);
	assert_eq!(evidence.top_snippet, "");
	assert_eq!(evidence.candidate_count, 0);

	let state = svc.run_cycle("Where is Georgia Tech located?").await.expect("cycle failed");

	assert_eq!(state.route, Some(RouteLabel::Action));
}

#[tokio::test]
async fn score_is_the_maximum_similarity_of_the_candidates() {
	let svc = service(
		ScriptedRetrieval::new(paper_fragments()),
		ScriptedCompletion::fixed("1"),
		"summary",
		"search",
	);
	let evidence = svc.score("How many datasets?").await.expect("score failed");

	assert_eq!(evidence.score, 0.62);
	assert_eq!(evidence.top_snippet, "The paper evaluates four datasets.");
	assert_eq!(evidence.candidate_count, 3);
}

#[tokio::test]
async fn invalid_tool_output_is_replaced_at_merge() {
	for bad in ["", "  ", "n/a", "None", "no result found"] {
		let svc = service(
			ScriptedRetrieval::new(paper_fragments()),
			ScriptedCompletion::fixed("1"),
			"summary",
			bad,
		);
		let state = svc.run_cycle("query").await.expect("cycle failed");

		assert_eq!(state.result, FALLBACK_ANSWER);
	}
}

#[tokio::test]
async fn valid_tool_output_passes_merge_unchanged() {
	let svc = service(
		ScriptedRetrieval::new(paper_fragments()),
		ScriptedCompletion::fixed("1"),
		"summary",
		"A meaningful answer.",
	);
	let state = svc.run_cycle("query").await.expect("cycle failed");

	assert_eq!(state.result, "A meaningful answer.");
}

#[tokio::test]
async fn completion_transport_failure_aborts_the_cycle() {
	let svc = service(
		ScriptedRetrieval::new(paper_fragments()),
		FailingCompletion,
		"summary",
		"search",
	);
	let err = svc.run_cycle("query").await.expect_err("cycle must abort");

	assert!(matches!(err, Error::Provider { .. }));
}

#[tokio::test]
async fn selector_submits_exactly_one_prompt_per_cycle() {
	let completion = Arc::new(ScriptedCompletion::fixed("1"));
	let providers = Providers {
		retrieval: Arc::new(ScriptedRetrieval::new(paper_fragments())),
		completion: completion.clone(),
	};
	let tools = Tools {
		summary: Arc::new(StaticTool::new("summary")),
		search: Arc::new(StaticTool::new("search")),
		action: Arc::new(ActionStub),
	};
	let svc = RudderService::new(test_config(), providers, tools);

	svc.run_cycle("query").await.expect("cycle failed");

	assert_eq!(completion.calls(), 1);
}
