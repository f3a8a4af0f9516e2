//! periscope: execute forum API requests through a hidden authenticated
//! webview session.
//!
//! The forum's API requires cookies that only a real browser sign-in can
//! mint. This crate multiplexes the host application's logical requests
//! over one invisible embedded webview: the widget loads the sign-in page
//! once, and every [`Bridge::call`] then runs as the authenticated browser
//! session.
//!
//! Control flow for one request:
//!
//! ```text
//! caller -> Bridge::call
//!        -> Session::when_ready        (gate on the load lifecycle)
//!        -> Correlator::register       (fresh correlation id)
//!        -> ScriptInjector::inject     (script runs in the page context)
//!        ...page performs the HTTP call with its cookies...
//!        <- WebviewEvent::Message      (tagged result payload)
//!        <- Correlator::dispatch       (settle by id)
//! caller <- response or error
//! ```
//!
//! The widget itself is supplied by the host UI layer as a
//! [`WebviewHandle`] plus a [`WebviewEvent`] channel; see the
//! `forum_client` example for a full wiring.

mod bridge;

pub use bridge::{Bridge, BridgeConfig};
pub use periscope_protocol::{
	InboundMessage, RemoteError, RequestConfig, ScriptPrimitives, build_request_script,
	parse_inbound, resolve_url, url_search_params,
};
pub use periscope_runtime::{
	DESKTOP_USER_AGENT, Error, Result, Session, SessionConfig, WebviewEvent, WebviewHandle,
};
