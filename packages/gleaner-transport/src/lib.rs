pub mod search;

mod error;

pub use error::{Error, Result};
pub use search::EngineClient;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};

pub fn auth_headers(
	api_key: Option<&str>,
	default_headers: &Map<String, Value>,
) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

	if let Some(key) = api_key {
		headers.insert(AUTHORIZATION, format!("ApiKey {key}").parse()?);
	}

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "Default header values must be strings.".to_string(),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}
