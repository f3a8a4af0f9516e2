//! Script injection: one logical request becomes one page script.

use std::sync::Arc;

use tracing::debug;

use periscope_protocol::{RequestConfig, ScriptPrimitives, build_request_script};

use crate::error::Result;
use crate::webview::WebviewHandle;

/// Serializes logical requests into scripts and hands them to the widget.
///
/// Fire-and-forget: one injection produces at most one inbound message,
/// and there are no retries at this layer.
pub struct ScriptInjector {
	webview: Arc<dyn WebviewHandle>,
	primitives: ScriptPrimitives,
}

impl ScriptInjector {
	/// Creates an injector using the default page globals.
	pub fn new(webview: Arc<dyn WebviewHandle>) -> Self {
		Self::with_primitives(webview, ScriptPrimitives::default())
	}

	/// Creates an injector with explicit page globals.
	pub fn with_primitives(webview: Arc<dyn WebviewHandle>, primitives: ScriptPrimitives) -> Self {
		Self { webview, primitives }
	}

	/// Builds and injects the script for one request.
	///
	/// All results flow back asynchronously through the message channel;
	/// the only synchronous failure is config serialization.
	pub fn inject(&self, id: &str, config: &RequestConfig) -> Result<()> {
		let script = build_request_script(&self.primitives, id, config)?;
		debug!(
			target = "periscope",
			id,
			method = %config.method,
			url = %config.url,
			"injecting request script"
		);
		self.webview.inject_script(&script);
		Ok(())
	}
}
