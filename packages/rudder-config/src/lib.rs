mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, LlmProviderConfig, ProviderConfig, Providers, Routing, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	validate_provider("providers.retrieval", &cfg.providers.retrieval)?;
	validate_llm_provider("providers.completion", &cfg.providers.completion)?;

	if cfg.routing.top_k == 0 {
		return Err(Error::Validation {
			message: "routing.top_k must be greater than zero.".to_string(),
		});
	}
	if cfg.routing.snippet_chars == 0 {
		return Err(Error::Validation {
			message: "routing.snippet_chars must be greater than zero.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.routing.relevance_floor) {
		return Err(Error::Validation {
			message: "routing.relevance_floor must be between zero and one.".to_string(),
		});
	}
	if !cfg.routing.search_hint_threshold.is_finite()
		|| cfg.routing.search_hint_threshold < cfg.routing.relevance_floor
	{
		return Err(Error::Validation {
			message: "routing.search_hint_threshold must be a finite number no smaller than \
			          routing.relevance_floor."
				.to_string(),
		});
	}

	Ok(())
}

fn validate_provider(section: &str, provider: &ProviderConfig) -> Result<()> {
	if provider.api_base.trim().is_empty() {
		return Err(Error::Validation { message: format!("{section}.api_base must be non-empty.") });
	}
	if provider.model.trim().is_empty() {
		return Err(Error::Validation { message: format!("{section}.model must be non-empty.") });
	}
	if provider.timeout_ms == 0 {
		return Err(Error::Validation {
			message: format!("{section}.timeout_ms must be greater than zero."),
		});
	}

	Ok(())
}

fn validate_llm_provider(section: &str, provider: &LlmProviderConfig) -> Result<()> {
	if provider.api_base.trim().is_empty() {
		return Err(Error::Validation { message: format!("{section}.api_base must be non-empty.") });
	}
	if provider.model.trim().is_empty() {
		return Err(Error::Validation { message: format!("{section}.model must be non-empty.") });
	}
	if provider.timeout_ms == 0 {
		return Err(Error::Validation {
			message: format!("{section}.timeout_ms must be greater than zero."),
		});
	}
	if !provider.temperature.is_finite() || provider.temperature < 0.0 {
		return Err(Error::Validation {
			message: format!("{section}.temperature must be zero or greater."),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	trim_trailing_slash(&mut cfg.providers.retrieval.api_base);
	trim_trailing_slash(&mut cfg.providers.completion.api_base);
}

fn trim_trailing_slash(api_base: &mut String) {
	while api_base.ends_with('/') {
		api_base.pop();
	}
}
