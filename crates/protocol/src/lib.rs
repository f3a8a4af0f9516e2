//! Wire types for the hidden-webview request bridge.
//!
//! The bridge multiplexes logical HTTP requests over a single embedded
//! webview: each outbound request is serialized into a script executed
//! inside the webview's authenticated page context, and each result comes
//! back as one JSON-stringified message tagged with the request's
//! correlation id.
//!
//! # Main Types
//!
//! - [`RequestConfig`] - one logical HTTP request, transported opaquely
//! - [`InboundMessage`] - a tagged result payload posted by the page
//! - [`RemoteError`] - snapshot of a browser-side failure
//! - [`ScriptPrimitives`] / [`build_request_script`] - the outbound script format

pub mod message;
pub mod request;
pub mod script;
pub mod url;

pub use message::{InboundMessage, RemoteError, parse_inbound};
pub use request::RequestConfig;
pub use script::{ScriptPrimitives, build_request_script};
pub use url::{resolve_url, url_search_params};
