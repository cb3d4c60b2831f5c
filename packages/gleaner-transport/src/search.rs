use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{Error, Result};
use gleaner_config::Engine;

/// HTTP client for one index's `_search` endpoint.
#[derive(Debug, Clone)]
pub struct EngineClient {
	client: Client,
	url: String,
}
impl EngineClient {
	pub fn new(cfg: &Engine) -> Result<Self> {
		let headers = crate::auth_headers(cfg.api_key.as_deref(), &cfg.default_headers)?;
		let client = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.default_headers(headers)
			.build()?;

		Ok(Self { client, url: search_url(&cfg.url, &cfg.index) })
	}

	/// Posts a query document and returns the raw response.
	///
	/// Error bodies that carry an `error` payload are returned as-is so the caller can report the
	/// engine's own message.
	pub async fn search(&self, body: &Value) -> Result<Value> {
		tracing::debug!(url = %self.url, "Posting search request.");

		let res = self.client.post(&self.url).json(body).send().await?;
		let status = res.status();
		let text = res.text().await?;

		parse_search_response(status, &text)
	}
}

fn search_url(base: &str, index: &str) -> String {
	format!("{}/{}/_search", base.trim_end_matches('/'), index)
}

fn parse_search_response(status: StatusCode, text: &str) -> Result<Value> {
	match serde_json::from_str::<Value>(text) {
		Ok(json) if status.is_success() || json.get("error").is_some() => Ok(json),
		Ok(_) => Err(Error::Status { status: status.as_u16(), body: text.to_string() }),
		Err(_) if !status.is_success() =>
			Err(Error::Status { status: status.as_u16(), body: text.to_string() }),
		Err(err) => Err(err.into()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builds_search_url_without_double_slash() {
		assert_eq!(
			search_url("http://localhost:9200/", "items"),
			"http://localhost:9200/items/_search"
		);
	}

	#[test]
	fn error_payload_survives_failed_status() {
		let json = parse_search_response(
			StatusCode::BAD_REQUEST,
			r#"{"error":"parse_exception","status":400}"#,
		)
		.expect("error payload should be returned");

		assert_eq!(json["error"], "parse_exception");
	}

	#[test]
	fn non_json_failure_reports_status() {
		let err = parse_search_response(StatusCode::BAD_GATEWAY, "upstream down")
			.expect_err("expected status error");

		assert!(matches!(err, Error::Status { status: 502, .. }));
	}

	#[test]
	fn json_failure_without_error_reports_status() {
		let err = parse_search_response(StatusCode::SERVICE_UNAVAILABLE, r#"{"ok":false}"#)
			.expect_err("expected status error");

		assert!(err.to_string().contains("HTTP 503"));
	}
}
