//! Inbound message parsing and the browser-side error snapshot.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// A tagged result payload posted by the page, correlating one injected
/// request to its outcome.
///
/// The payload is untrusted JSON from the browser context. [`parse_inbound`]
/// tolerates malformed input by returning `None`; anything that is not a
/// JSON object carrying a string `id` is treated as non-correlated traffic.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
	/// Correlation id assigned when the request was injected.
	pub id: String,
	/// Success payload. Absent or `null` when the request failed.
	#[serde(default)]
	pub response: Option<Value>,
	/// Failure payload. Presence takes precedence over `response`.
	#[serde(default)]
	pub error: Option<Value>,
}

impl InboundMessage {
	/// Settles the message into a single outcome.
	///
	/// A present `error` wins over `response`; a missing `response` settles
	/// to JSON `null`.
	pub fn into_outcome(self) -> Result<Value, RemoteError> {
		match self.error {
			Some(error) => Err(RemoteError::new(error)),
			None => Ok(self.response.unwrap_or(Value::Null)),
		}
	}
}

/// Parses one raw inbound payload.
///
/// Returns `None` for anything other than a JSON object with a string `id`:
/// malformed JSON, scalars, arrays, and objects with a non-string id are all
/// dropped by the caller rather than surfaced as errors.
pub fn parse_inbound(raw: &str) -> Option<InboundMessage> {
	serde_json::from_str(raw).ok()
}

/// Snapshot of a browser-side failure.
///
/// The injected script flattens the page-side error object (including its
/// non-enumerable diagnostic fields) into plain JSON before posting, so the
/// payload shape is whatever the page's HTTP client produced. Well-known
/// fields are exposed through [`message`](Self::message) and
/// [`name`](Self::name); the full payload stays available for callers that
/// need more.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteError {
	payload: Value,
}

impl RemoteError {
	/// Wraps a raw error payload.
	pub fn new(payload: Value) -> Self {
		Self { payload }
	}

	/// The `message` field of the snapshot, when present.
	pub fn message(&self) -> Option<&str> {
		self.payload.get("message")?.as_str()
	}

	/// The `name` field of the snapshot, when present.
	pub fn name(&self) -> Option<&str> {
		self.payload.get("name")?.as_str()
	}

	/// Borrows the full error payload.
	pub fn payload(&self) -> &Value {
		&self.payload
	}

	/// Consumes the error, returning the full payload.
	pub fn into_payload(self) -> Value {
		self.payload
	}
}

impl fmt::Display for RemoteError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match (self.name(), self.message()) {
			(Some(name), Some(message)) => write!(f, "{name}: {message}"),
			(None, Some(message)) => write!(f, "{message}"),
			_ => write!(f, "browser request failed: {}", self.payload),
		}
	}
}

impl std::error::Error for RemoteError {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_response_message() {
		let msg = parse_inbound(r#"{"id":"r1","response":{"title":"hello"}}"#).unwrap();
		assert_eq!(msg.id, "r1");
		let value = msg.into_outcome().unwrap();
		assert_eq!(value["title"], "hello");
	}

	#[test]
	fn parses_error_message() {
		let msg = parse_inbound(r#"{"id":"r1","error":{"message":"boom"}}"#).unwrap();
		let err = msg.into_outcome().unwrap_err();
		assert_eq!(err.message(), Some("boom"));
	}

	#[test]
	fn error_wins_over_response() {
		let msg =
			parse_inbound(r#"{"id":"r1","response":42,"error":{"message":"boom"}}"#).unwrap();
		assert!(msg.into_outcome().is_err());
	}

	#[test]
	fn null_error_settles_as_success() {
		let msg = parse_inbound(r#"{"id":"r1","error":null,"response":42}"#).unwrap();
		assert_eq!(msg.into_outcome().unwrap(), 42);
	}

	#[test]
	fn missing_response_settles_to_null() {
		let msg = parse_inbound(r#"{"id":"r1"}"#).unwrap();
		assert_eq!(msg.into_outcome().unwrap(), Value::Null);
	}

	#[test]
	fn malformed_json_is_rejected() {
		assert!(parse_inbound("not json at all").is_none());
		assert!(parse_inbound(r#"{"id":"r1""#).is_none());
	}

	#[test]
	fn non_object_payloads_are_rejected() {
		assert!(parse_inbound("42").is_none());
		assert!(parse_inbound(r#""hello""#).is_none());
		assert!(parse_inbound("[1,2,3]").is_none());
	}

	#[test]
	fn non_string_id_is_rejected() {
		assert!(parse_inbound(r#"{"id":7,"response":1}"#).is_none());
		assert!(parse_inbound(r#"{"response":1}"#).is_none());
	}

	#[test]
	fn unknown_fields_are_tolerated() {
		let msg = parse_inbound(r#"{"id":"r9","response":1,"extra":true}"#).unwrap();
		assert_eq!(msg.id, "r9");
	}

	#[test]
	fn remote_error_display_prefers_name_and_message() {
		let err = RemoteError::new(serde_json::json!({
			"name": "NetworkError",
			"message": "timeout of 10000ms exceeded",
		}));
		assert_eq!(err.to_string(), "NetworkError: timeout of 10000ms exceeded");

		let bare = RemoteError::new(serde_json::json!({"code": "ECONNABORTED"}));
		assert!(bare.to_string().contains("ECONNABORTED"));
	}
}
