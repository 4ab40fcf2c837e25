use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

use rudder_domain::Fragment;

/// Fetches the top-K fragments most similar to `query` from the external
/// retrieval index. The call never mutates the index; an empty result list is
/// a valid response.
pub async fn retrieve(
	cfg: &rudder_config::ProviderConfig,
	query: &str,
	top_k: u32,
) -> Result<Vec<Fragment>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({ "model": cfg.model, "query": query, "top_k": top_k });
	let res = client
		.post(url)
		.headers(crate::provider_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_retrieval_response(json)
}

fn parse_retrieval_response(json: Value) -> Result<Vec<Fragment>> {
	let results = json
		.get("results")
		.or_else(|| json.get("data"))
		.and_then(|v| v.as_array())
		.ok_or_else(|| eyre::eyre!("Retrieval response is missing results array."))?;
	let mut fragments = Vec::with_capacity(results.len());

	for item in results {
		let text = item
			.get("text")
			.and_then(|v| v.as_str())
			.ok_or_else(|| eyre::eyre!("Retrieval result missing text."))?
			.to_string();
		let similarity = item
			.get("similarity")
			.or_else(|| item.get("score"))
			.and_then(|v| v.as_f64())
			.ok_or_else(|| eyre::eyre!("Retrieval result missing similarity."))? as f32;

		fragments.push(Fragment { text, similarity });
	}

	Ok(fragments)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_fragments_in_retrieval_order() {
		let json = serde_json::json!({
			"results": [
				{ "text": "second-best passage", "similarity": 0.4 },
				{ "text": "best passage", "similarity": 0.9 }
			]
		});
		let fragments = parse_retrieval_response(json).expect("parse failed");

		assert_eq!(fragments.len(), 2);
		assert_eq!(fragments[0].text, "second-best passage");
		assert_eq!(fragments[1].similarity, 0.9);
	}

	#[test]
	fn accepts_score_as_similarity_key() {
		let json = serde_json::json!({
			"results": [{ "text": "passage", "score": 0.25 }]
		});
		let fragments = parse_retrieval_response(json).expect("parse failed");

		assert_eq!(fragments[0].similarity, 0.25);
	}

	#[test]
	fn empty_results_parse_to_empty_list() {
		let json = serde_json::json!({ "results": [] });

		assert!(parse_retrieval_response(json).expect("parse failed").is_empty());
	}

	#[test]
	fn rejects_payload_without_results() {
		let json = serde_json::json!({ "items": [] });

		assert!(parse_retrieval_response(json).is_err());
	}
}
