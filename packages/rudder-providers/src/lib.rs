pub mod completion;
pub mod retrieval;

use color_eyre::{Result, eyre};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};

/// Bearer auth plus any extra headers configured for the provider. Header
/// values must be strings; anything else in the config map is rejected.
pub fn provider_headers(api_key: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(AUTHORIZATION, HeaderValue::try_from(format!("Bearer {api_key}"))?);

	for (key, value) in default_headers {
		let raw = value
			.as_str()
			.ok_or_else(|| eyre::eyre!("Default header {key} must be a string."))?;

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builds_bearer_and_default_headers() {
		let mut defaults = Map::new();
		defaults.insert("x-tenant".to_string(), Value::String("acme".to_string()));

		let headers = provider_headers("secret", &defaults).expect("headers failed");

		assert_eq!(headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()), Some("Bearer secret"));
		assert_eq!(headers.get("x-tenant").and_then(|v| v.to_str().ok()), Some("acme"));
	}

	#[test]
	fn rejects_non_string_header_values() {
		let mut defaults = Map::new();
		defaults.insert("x-retries".to_string(), Value::from(3));

		assert!(provider_headers("secret", &defaults).is_err());
	}
}
