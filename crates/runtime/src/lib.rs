//! Bridge runtime: webview session lifecycle, message correlation, and
//! script injection.
//!
//! The runtime owns everything between the bridge facade and the embedded
//! webview widget:
//!
//! - [`Session`] tracks the widget's load lifecycle per generation and
//!   gates outbound traffic on readiness
//! - [`Correlator`] pairs injected requests with their inbound result
//!   messages by correlation id
//! - [`ScriptInjector`] serializes requests into page scripts
//! - [`WebviewHandle`] / [`WebviewEvent`] form the seam to the widget:
//!   outbound calls go through the trait, inbound signals arrive as typed
//!   events on a channel
//!
//! The widget itself (rendering, cookie jar, user-agent override) lives in
//! the host application's UI layer and is out of scope here.

pub mod config;
pub mod correlator;
pub mod error;
pub mod injector;
pub mod session;
pub mod webview;

pub use config::{DESKTOP_USER_AGENT, SessionConfig};
pub use correlator::Correlator;
pub use error::{Error, Result};
pub use injector::ScriptInjector;
pub use session::Session;
pub use webview::{WebviewEvent, WebviewHandle};
