//! Wires the bridge to a simulated widget and performs a few calls.
//!
//! In the real application the widget is the host UI's hidden webview; here
//! a simulation stands in for it, "executing" each injected script by
//! extracting the embedded request and posting a canned result message.

use std::sync::Arc;

use periscope::{
	Bridge, BridgeConfig, RequestConfig, SessionConfig, WebviewEvent, WebviewHandle,
};
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

struct SimulatedWebview {
	events: mpsc::UnboundedSender<WebviewEvent>,
}

impl SimulatedWebview {
	/// Pulls the embedded correlation id and request config back out of an
	/// injected script. A real webview would just execute it.
	fn extract(script: &str) -> Option<(String, Value)> {
		let first_line = script.lines().next()?;
		let config_start = first_line.find('(')? + 1;
		let config_end = first_line.rfind(')')?;
		let config: Value = serde_json::from_str(&first_line[config_start..config_end]).ok()?;

		let id_start = script.find("id: ")? + 4;
		let id_end = script[id_start..].find(",\n")?;
		let id: String = serde_json::from_str(&script[id_start..id_start + id_end]).ok()?;

		Some((id, config))
	}

	fn respond(&self, id: &str, config: &Value) {
		let url = config["url"].as_str().unwrap_or_default();
		let payload = if url.contains("/api/topics/") {
			json!({"id": id, "response": {"title": "hello", "replies": 3}})
		} else if url.contains("/api/members/") {
			json!({"id": id, "response": {"username": "tom", "created": 1234567890}})
		} else {
			json!({"id": id, "error": {"name": "NotFound", "message": format!("no route for {url}")}})
		};
		let _ = self
			.events
			.send(WebviewEvent::Message(payload.to_string()));
	}
}

impl WebviewHandle for SimulatedWebview {
	fn inject_script(&self, script: &str) {
		if let Some((id, config)) = Self::extract(script) {
			self.respond(&id, &config);
		}
	}

	fn reload(&self) {
		// A remounted simulation loads instantly.
		let _ = self.events.send(WebviewEvent::LoadFinished);
	}

	fn clear_cache(&self) {}
}

fn init_logging() {
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_target(true)
		.compact()
		.init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	init_logging();

	let (events, rx) = mpsc::unbounded_channel();
	let webview = Arc::new(SimulatedWebview {
		events: events.clone(),
	});
	let bridge = Bridge::new(
		webview,
		rx,
		BridgeConfig::new(SessionConfig::new("https://forum.example.com")),
	);

	println!("sign-in page: {}", bridge.session_config().signin_url());

	// The widget finishes loading the sign-in page.
	events.send(WebviewEvent::LoadFinished)?;

	let topic = bridge.call(RequestConfig::get("/api/topics/1.json")).await?;
	println!("topic: {topic}");

	let member = bridge
		.call(RequestConfig::get("/api/members/tom.json"))
		.await?;
	println!("member: {member}");

	match bridge.call(RequestConfig::get("/api/missing")).await {
		Ok(value) => println!("unexpected: {value}"),
		Err(err) => println!("failed as expected: {err}"),
	}

	Ok(())
}
