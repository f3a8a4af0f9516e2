//! Logical request configuration transported through the bridge.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One logical HTTP request, as understood by the in-page HTTP primitive.
///
/// The bridge never interprets these fields; they are serialized verbatim
/// into the injected script and consumed by the page-side HTTP client.
/// Field names follow that client's camelCase convention on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestConfig {
	/// HTTP method (e.g. `"GET"`, `"POST"`).
	pub method: String,
	/// Target URL, absolute or relative to the webview's origin.
	pub url: String,
	/// Query parameters appended by the page-side client.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub params: Option<BTreeMap<String, String>>,
	/// Request body, serialized by the page-side client.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<Value>,
	/// Extra request headers.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub headers: Option<BTreeMap<String, String>>,
	/// Expected response type hint (e.g. `"json"`, `"text"`).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub response_type: Option<String>,
}

impl RequestConfig {
	/// Creates a GET request for `url`.
	pub fn get(url: impl Into<String>) -> Self {
		Self::new("GET", url)
	}

	/// Creates a POST request for `url` carrying `data` as its body.
	pub fn post(url: impl Into<String>, data: Value) -> Self {
		let mut config = Self::new("POST", url);
		config.data = Some(data);
		config
	}

	/// Creates a request with an explicit method.
	pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
		Self {
			method: method.into(),
			url: url.into(),
			params: None,
			data: None,
			headers: None,
			response_type: None,
		}
	}

	/// Adds a single header, creating the header map on first use.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers
			.get_or_insert_with(BTreeMap::new)
			.insert(name.into(), value.into());
		self
	}

	/// Adds a single query parameter, creating the param map on first use.
	pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.params
			.get_or_insert_with(BTreeMap::new)
			.insert(name.into(), value.into());
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn get_request_serializes_minimal_fields() {
		let config = RequestConfig::get("/api/topics/1.json");
		let json = serde_json::to_string(&config).unwrap();
		assert_eq!(json, r#"{"method":"GET","url":"/api/topics/1.json"}"#);
	}

	#[test]
	fn post_request_carries_body() {
		let config = RequestConfig::post("/api/replies", serde_json::json!({"content": "hi"}));
		let json = serde_json::to_value(&config).unwrap();
		assert_eq!(json["method"], "POST");
		assert_eq!(json["data"]["content"], "hi");
	}

	#[test]
	fn response_type_uses_camel_case_on_the_wire() {
		let mut config = RequestConfig::get("/feed");
		config.response_type = Some("text".into());
		let json = serde_json::to_string(&config).unwrap();
		assert!(json.contains(r#""responseType":"text""#));
	}

	#[test]
	fn with_header_and_param_accumulate() {
		let config = RequestConfig::get("/search")
			.with_param("q", "rust")
			.with_param("page", "2")
			.with_header("Accept", "application/json");
		assert_eq!(config.params.as_ref().unwrap().len(), 2);
		assert_eq!(
			config.headers.as_ref().unwrap().get("Accept").map(String::as_str),
			Some("application/json")
		);
	}
}
