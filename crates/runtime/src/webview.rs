//! The seam between the bridge and the embedded webview widget.
//!
//! The widget is owned by the host application's UI layer. Outbound, the
//! bridge drives it through [`WebviewHandle`]; inbound, the widget emits
//! [`WebviewEvent`]s on a channel the bridge consumes. Nothing else crosses
//! the boundary: no shared memory, no callback slots.

/// Host-side handle to the embedded webview widget.
///
/// Implementations are expected to be cheap to call from async context;
/// all three operations are fire-and-forget from the bridge's perspective.
pub trait WebviewHandle: Send + Sync {
	/// Executes a script inside the webview's authenticated page context.
	fn inject_script(&self, script: &str);

	/// Remounts the widget with a fresh identity, discarding in-flight
	/// page state and starting a new load of the sign-in page.
	fn reload(&self);

	/// Clears the webview's cache and cookies.
	fn clear_cache(&self);
}

/// Typed inbound signals from the widget layer.
///
/// The contract is that only the currently mounted widget instance emits
/// events; a remount (see [`WebviewHandle::reload`]) replaces the emitter.
#[derive(Debug, Clone)]
pub enum WebviewEvent {
	/// The sign-in page finished loading; the session may become ready.
	LoadFinished,
	/// Navigation or network failure before the page could load.
	LoadFailed {
		/// Human-readable failure description from the widget.
		reason: String,
	},
	/// One JSON-stringified payload posted from the page context.
	Message(String),
}
