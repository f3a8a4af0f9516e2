//! Outbound script format.
//!
//! Each logical request becomes one self-contained script executed inside
//! the webview's authenticated page context. The script performs the HTTP
//! call through a globally available primitive and posts a single tagged
//! result message back to the host, success or failure. There is no shared
//! state between invocations.

use serde_json::Value;

use crate::request::RequestConfig;

/// Globals the injected script expects inside the page context.
#[derive(Debug, Clone)]
pub struct ScriptPrimitives {
	/// HTTP-call primitive: a function taking a request config and
	/// returning a promise of the response.
	pub http_call: String,
	/// Post primitive: a function taking one string payload and delivering
	/// it to the host's message channel.
	pub post_message: String,
}

impl Default for ScriptPrimitives {
	fn default() -> Self {
		Self {
			http_call: "window.axios".to_string(),
			post_message: "window.ReactNativeWebView.postMessage".to_string(),
		}
	}
}

/// Builds the script for one request.
///
/// The correlation id and request config are embedded as JSON literals, so
/// arbitrary strings survive quoting. On failure the page-side error object
/// is flattened with `Object.getOwnPropertyNames` so its non-enumerable
/// diagnostic fields survive serialization.
///
/// # Errors
///
/// Returns a serialization error if `config` cannot be encoded as JSON
/// (only possible for non-string map keys or non-finite numbers in `data`).
pub fn build_request_script(
	primitives: &ScriptPrimitives,
	id: &str,
	config: &RequestConfig,
) -> Result<String, serde_json::Error> {
	let config_json = serde_json::to_string(config)?;
	let id_json = Value::String(id.to_string()).to_string();
	let http = &primitives.http_call;
	let post = &primitives.post_message;

	Ok(format!(
		"{http}({config_json})\n\
		 .then(response => {{\n\
		 \t{post}(JSON.stringify({{\n\
		 \t\tid: {id_json},\n\
		 \t\tresponse: response,\n\
		 \t}}))\n\
		 }})\n\
		 .catch(error => {{\n\
		 \t{post}(JSON.stringify({{\n\
		 \t\tid: {id_json},\n\
		 \t\terror: JSON.parse(JSON.stringify(error, Object.getOwnPropertyNames(error))),\n\
		 \t}}))\n\
		 }}); void(0);"
	))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn script_embeds_config_and_id() {
		let script = build_request_script(
			&ScriptPrimitives::default(),
			"r1",
			&RequestConfig::get("/api/topics/1.json"),
		)
		.unwrap();

		assert!(script.starts_with(
			r#"window.axios({"method":"GET","url":"/api/topics/1.json"})"#
		));
		assert!(script.contains(r#"id: "r1","#));
		assert!(script.contains("window.ReactNativeWebView.postMessage"));
		assert!(script.ends_with("void(0);"));
	}

	#[test]
	fn failure_branch_snapshots_non_enumerable_fields() {
		let script = build_request_script(
			&ScriptPrimitives::default(),
			"r2",
			&RequestConfig::get("/feed"),
		)
		.unwrap();
		assert!(
			script.contains("JSON.stringify(error, Object.getOwnPropertyNames(error))")
		);
	}

	#[test]
	fn id_with_quotes_is_escaped() {
		let script = build_request_script(
			&ScriptPrimitives::default(),
			r#"r"1"#,
			&RequestConfig::get("/feed"),
		)
		.unwrap();
		assert!(script.contains(r#"id: "r\"1","#));
	}

	#[test]
	fn custom_primitives_replace_the_globals() {
		let primitives = ScriptPrimitives {
			http_call: "globalThis.fetchJson".into(),
			post_message: "globalThis.hostPost".into(),
		};
		let script =
			build_request_script(&primitives, "r1", &RequestConfig::get("/feed")).unwrap();
		assert!(script.starts_with("globalThis.fetchJson("));
		assert!(script.contains("globalThis.hostPost(JSON.stringify("));
		assert!(!script.contains("window.axios"));
	}
}
