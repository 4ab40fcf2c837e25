use std::{fs, path::PathBuf, sync::Arc, time::Instant};

use clap::Parser;
use color_eyre::eyre;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing_subscriber::EnvFilter;

use rudder_config::{Config, LlmProviderConfig};
use rudder_domain::RouteLabel;
use rudder_service::{
	ActionStub, AnsweringTool, BoxFuture, Providers, RudderService, Tools,
};
use rudder_testkit::{ScriptedCompletion, ScriptedRetrieval, StaticTool};

#[derive(Debug, Parser)]
#[command(
	version = rudder_cli::VERSION,
	rename_all = "kebab",
	styles = rudder_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// TOML case file; the built-in battery runs when omitted.
	#[arg(long, short = 'd', value_name = "FILE")]
	pub dataset: Option<PathBuf>,
	/// Write the JSON report here in addition to the console summary.
	#[arg(long, short = 'o', value_name = "FILE")]
	pub out: Option<PathBuf>,
	/// Run against scripted collaborators instead of live services.
	#[arg(long)]
	pub offline: bool,
}

#[derive(Debug, Deserialize)]
struct EvalDataset {
	name: Option<String>,
	cases: Vec<EvalCase>,
}

#[derive(Debug, Clone, Deserialize)]
struct EvalCase {
	name: String,
	query: String,
	expected_route: RouteLabel,
}

#[derive(Debug, Serialize)]
struct EvalOutput {
	dataset: DatasetInfo,
	summary: EvalSummary,
	generated_at: String,
	cases: Vec<CaseReport>,
}

#[derive(Debug, Serialize)]
struct DatasetInfo {
	name: String,
	case_count: usize,
}

#[derive(Debug, Serialize)]
struct EvalSummary {
	passed: usize,
	failed: usize,
}

#[derive(Debug, Serialize)]
struct CaseReport {
	name: String,
	query: String,
	route: String,
	expected_route: String,
	result: String,
	elapsed_secs: f64,
	pass: bool,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = rudder_config::load(&args.config)?;
	let filter = EnvFilter::new(config.service.log_level.clone());
	tracing_subscriber::fmt().with_env_filter(filter).init();

	let dataset = match &args.dataset {
		Some(path) => {
			let raw = fs::read_to_string(path)?;

			toml::from_str::<EvalDataset>(&raw)?
		},
		None => builtin_battery(),
	};
	let service = if args.offline { offline_service(config) } else { live_service(config) };
	let output = evaluate(&service, dataset).await;

	for case in &output.cases {
		println!();
		println!("Test: {}", case.name);
		println!("Query: {}", case.query);
		println!("Result: {}", case.result);
		println!(
			"Pass: {}, Expected Route: {}, Actual Route: {}",
			case.pass, case.expected_route, case.route
		);
		println!("Elapsed Time: {} seconds", case.elapsed_secs);
	}

	println!();
	println!(
		"===== Workflow Completed: {}/{} passed =====",
		output.summary.passed,
		output.dataset.case_count
	);

	if let Some(path) = &args.out {
		fs::write(path, serde_json::to_string_pretty(&output)?)?;
	}

	Ok(())
}

async fn evaluate(service: &RudderService, dataset: EvalDataset) -> EvalOutput {
	let name = dataset.name.unwrap_or_else(|| "builtin".to_string());
	let case_count = dataset.cases.len();
	let mut cases = Vec::with_capacity(case_count);

	for case in dataset.cases {
		let started = Instant::now();
		let report = match service.run_cycle(&case.query).await {
			Ok(state) => {
				let route =
					state.route.map(|route| route.to_string()).unwrap_or_else(|| "unset".to_string());
				let pass = state.route == Some(case.expected_route);

				CaseReport {
					name: case.name,
					query: case.query,
					route,
					expected_route: case.expected_route.to_string(),
					result: state.result,
					elapsed_secs: round2(started.elapsed().as_secs_f64()),
					pass,
				}
			},
			Err(err) => {
				tracing::error!(case = case.name.as_str(), error = %err, "Cycle failed.");

				CaseReport {
					name: case.name,
					query: case.query,
					route: "error".to_string(),
					expected_route: case.expected_route.to_string(),
					result: err.to_string(),
					elapsed_secs: round2(started.elapsed().as_secs_f64()),
					pass: false,
				}
			},
		};

		cases.push(report);
	}

	let passed = cases.iter().filter(|case| case.pass).count();

	EvalOutput {
		dataset: DatasetInfo { name, case_count },
		summary: EvalSummary { passed, failed: case_count - passed },
		generated_at: OffsetDateTime::now_utc()
			.format(&Rfc3339)
			.unwrap_or_else(|_| String::new()),
		cases,
	}
}

fn builtin_battery() -> EvalDataset {
	EvalDataset {
		name: Some("builtin".to_string()),
		cases: vec![
			EvalCase {
				name: "Out of scope query".to_string(),
				query: "Where is Georgia Tech located?".to_string(),
				expected_route: RouteLabel::Action,
			},
			EvalCase {
				name: "Basic summary".to_string(),
				query: "What is the main idea of the document?".to_string(),
				expected_route: RouteLabel::Summary,
			},
			EvalCase {
				name: "Search for specific information".to_string(),
				query: "How many datasets did author Aaqib use in his paper?".to_string(),
				expected_route: RouteLabel::Search,
			},
			EvalCase {
				name: "Out of scope query".to_string(),
				query: "How do you treat a broken bone?".to_string(),
				expected_route: RouteLabel::Action,
			},
		],
	}
}

fn live_service(config: Config) -> RudderService {
	let summary = CompletionTool::new(
		&config.providers.completion,
		"Summarize the indexed document for the following request.",
	);
	let search = CompletionTool::new(
		&config.providers.completion,
		"Answer the following request from the indexed document.",
	);
	let tools = Tools {
		summary: Arc::new(summary),
		search: Arc::new(search),
		action: Arc::new(ActionStub),
	};

	RudderService::with_default_providers(config, tools)
}

/// Scripted collaborators wired so the built-in battery exercises every graph
/// path without live services.
fn offline_service(config: Config) -> RudderService {
	let providers = Providers {
		retrieval: Arc::new(ScriptedRetrieval::single(
			"The paper introduces a routing agent and evaluates it on four datasets.",
			0.5,
		)),
		completion: Arc::new(ScriptedCompletion::sequence(&["2", "0", "1", "2"])),
	};
	let tools = Tools {
		summary: Arc::new(StaticTool::new("The document proposes a document-QA routing agent.")),
		search: Arc::new(StaticTool::new("The author used four datasets.")),
		action: Arc::new(ActionStub),
	};

	RudderService::new(config, providers, tools)
}

/// Stand-in answering tool delegating to the completion service until a real
/// query engine collaborator is attached.
struct CompletionTool {
	cfg: LlmProviderConfig,
	instruction: &'static str,
}
impl CompletionTool {
	fn new(cfg: &LlmProviderConfig, instruction: &'static str) -> Self {
		Self { cfg: cfg.clone(), instruction }
	}
}
impl AnsweringTool for CompletionTool {
	fn answer<'a>(&'a self, query: &'a str) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(async move {
			let prompt = format!("{}\n\nQuery: {query}", self.instruction);
			let reply = rudder_providers::completion::complete(&self.cfg, &prompt).await?;

			if reply.trim().is_empty() {
				return Err(eyre::eyre!("Completion reply was empty."));
			}

			Ok(reply)
		})
	}
}

fn round2(secs: f64) -> f64 {
	(secs * 100.0).round() / 100.0
}
