//! The bridge facade: the single entry point other subsystems call.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use periscope_protocol::{RequestConfig, ScriptPrimitives};
use periscope_runtime::{
	Correlator, Error, Result, ScriptInjector, Session, SessionConfig, WebviewEvent, WebviewHandle,
};
use serde_json::Value;

/// Fully owned bridge configuration.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
	/// Session/webview configuration applied by the widget layer.
	pub session: SessionConfig,
	/// Page globals referenced by injected scripts.
	pub primitives: ScriptPrimitives,
	/// Optional TTL after which an unsettled pending request is evicted
	/// and its caller sees [`Error::Expired`]. `None` reproduces the
	/// historical behavior: an orphaned request stays registered forever.
	pub pending_ttl: Option<Duration>,
}

impl BridgeConfig {
	/// Creates a baseline config: default page globals, no pending TTL.
	pub fn new(session: SessionConfig) -> Self {
		Self {
			session,
			primitives: ScriptPrimitives::default(),
			pending_ttl: None,
		}
	}
}

/// Executes forum API requests through the hidden webview's authenticated
/// context.
///
/// The bridge owns the session, the correlator, and the injector, and is
/// the sole caller of register + inject, always as a pair: no correlation
/// entry is ever created without its script. It also owns the
/// inbound pump: a task consuming the widget's [`WebviewEvent`] channel
/// and routing lifecycle signals to the session and payloads to the
/// correlator.
pub struct Bridge {
	session: Arc<Session>,
	correlator: Arc<Correlator>,
	injector: ScriptInjector,
	config: BridgeConfig,
	next_id: AtomicU64,
	pump: tokio::task::JoinHandle<()>,
}

impl Bridge {
	/// Creates a bridge over a mounted widget.
	///
	/// `events` is the widget's inbound channel; the bridge consumes it on
	/// a spawned task for as long as the widget lives, so this must be
	/// called from within a Tokio runtime.
	pub fn new(
		webview: Arc<dyn WebviewHandle>,
		events: mpsc::UnboundedReceiver<WebviewEvent>,
		config: BridgeConfig,
	) -> Self {
		let session = Arc::new(Session::new(webview.clone()));
		let correlator = Arc::new(Correlator::new());
		let injector = ScriptInjector::with_primitives(webview, config.primitives.clone());
		let pump = tokio::spawn(pump_events(events, session.clone(), correlator.clone()));

		Self {
			session,
			correlator,
			injector,
			config,
			next_id: AtomicU64::new(1),
			pump,
		}
	}

	/// Executes one logical request through the webview.
	///
	/// Waits for the session to be ready, registers a fresh correlation
	/// id, injects the request script, and awaits the matching inbound
	/// message. Scripts are never injected before the session has signalled
	/// ready.
	///
	/// # Errors
	///
	/// - [`Error::LoadFailed`] / [`Error::SessionReloaded`] from the
	///   session gate
	/// - [`Error::Remote`] when the browser-side HTTP call fails; local to
	///   this request
	/// - [`Error::Expired`] when `pending_ttl` is configured and elapses
	/// - [`Error::Closed`] when the bridge is torn down mid-flight
	pub async fn call(&self, config: RequestConfig) -> Result<Value> {
		self.session.when_ready().await?;

		let id = self.next_correlation_id();
		let slot = self.correlator.register(&id);
		if let Err(err) = self.injector.inject(&id, &config) {
			// Keep register + inject paired: no script, no registry entry.
			self.correlator.discard(&id);
			return Err(err);
		}

		let settled = match self.config.pending_ttl {
			Some(ttl) => match tokio::time::timeout(ttl, slot).await {
				Ok(settled) => settled,
				Err(_) => {
					self.correlator.discard(&id);
					return Err(Error::Expired { id });
				}
			},
			None => slot.await,
		};

		settled.map_err(|_| Error::Closed)?
	}

	/// Resolves once the session is ready; rejects on load failure.
	pub async fn when_ready(&self) -> Result<()> {
		self.session.when_ready().await
	}

	/// Reloads the webview session.
	///
	/// Starts a new session generation, remounts the widget, and rejects
	/// every outstanding pending request with [`Error::SessionReloaded`]:
	/// their scripts died with the old webview, so their messages will
	/// never arrive. (The historical client left them pending forever.)
	pub fn reload(&self) {
		self.session.reload();
		self.correlator.reject_all();
	}

	/// Clears the webview's cache and cookies, independent of readiness.
	pub fn clear_cache(&self) {
		self.session.clear_cache();
	}

	/// Session/webview configuration for the widget layer to apply.
	pub fn session_config(&self) -> &SessionConfig {
		&self.config.session
	}

	/// Number of requests currently awaiting an inbound message.
	pub fn pending_requests(&self) -> usize {
		self.correlator.pending_len()
	}

	fn next_correlation_id(&self) -> String {
		let n = self.next_id.fetch_add(1, Ordering::SeqCst);
		format!("r{n}")
	}
}

impl Drop for Bridge {
	fn drop(&mut self) {
		self.pump.abort();
	}
}

async fn pump_events(
	mut events: mpsc::UnboundedReceiver<WebviewEvent>,
	session: Arc<Session>,
	correlator: Arc<Correlator>,
) {
	while let Some(event) = events.recv().await {
		match event {
			WebviewEvent::LoadFinished => session.notify_loaded(),
			WebviewEvent::LoadFailed { reason } => session.notify_load_error(reason),
			WebviewEvent::Message(raw) => correlator.dispatch(&raw),
		}
	}
	debug!(target = "periscope", "webview event channel closed, stopping pump");
}
