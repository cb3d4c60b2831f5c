mod error;
mod types;

pub use error::{Error, Result};
pub use types::{BoostDef, Catalog, Config, ContentServiceDef, ElementDef, Engine, Search, Service};

use std::{collections::HashSet, fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn load_catalog(path: &Path) -> Result<Catalog> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut catalog: Catalog = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize_catalog(&mut catalog);

	validate_catalog(&catalog)?;

	Ok(catalog)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.engine.url.trim().is_empty() {
		return Err(Error::Validation { message: "engine.url must be non-empty.".to_string() });
	}
	if cfg.engine.index.trim().is_empty() {
		return Err(Error::Validation { message: "engine.index must be non-empty.".to_string() });
	}
	if !matches!(cfg.engine.dialect.as_str(), "modern" | "legacy") {
		return Err(Error::Validation {
			message: "engine.dialect must be one of modern or legacy.".to_string(),
		});
	}
	if cfg.engine.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "engine.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (key, value) in &cfg.engine.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("engine.default_headers.{key} must be a string."),
			});
		}
	}

	if cfg.search.bucket_limit == 0 {
		return Err(Error::Validation {
			message: "search.bucket_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.search.alphanumeric_bucket_limit < cfg.search.bucket_limit {
		return Err(Error::Validation {
			message: "search.alphanumeric_bucket_limit must not be below search.bucket_limit."
				.to_string(),
		});
	}

	Ok(())
}

pub fn validate_catalog(catalog: &Catalog) -> Result<()> {
	let mut names = HashSet::new();

	for element in &catalog.elements {
		if element.name.trim().is_empty() {
			return Err(Error::Validation {
				message: "elements.name must be non-empty.".to_string(),
			});
		}
		if !names.insert(element.name.as_str()) {
			return Err(Error::Validation {
				message: format!("elements.name '{}' is defined more than once.", element.name),
			});
		}
	}

	let mut keys = HashSet::new();

	for service in &catalog.services {
		if service.key.trim().is_empty() {
			return Err(Error::Validation {
				message: "services.key must be non-empty.".to_string(),
			});
		}
		if !keys.insert(service.key.as_str()) {
			return Err(Error::Validation {
				message: format!("services.key '{}' is defined more than once.", service.key),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.engine.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.engine.api_key = None;
	}

	let trimmed = cfg.engine.url.trim_end_matches('/').to_string();

	cfg.engine.url = trimmed;
}

fn normalize_catalog(catalog: &mut Catalog) {
	for element in &mut catalog.elements {
		if element.label.as_deref().map(|label| label.trim().is_empty()).unwrap_or(false) {
			element.label = None;
		}
	}
	for service in &mut catalog.services {
		if service.uri.as_deref().map(|uri| uri.trim().is_empty()).unwrap_or(false) {
			service.uri = None;
		}
	}
}
