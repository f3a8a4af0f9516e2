//! Webview session configuration.

use serde::{Deserialize, Serialize};

/// Desktop user-agent presented by the hidden webview.
///
/// The forum's sign-in flow serves a degraded page to recognized mobile
/// in-app browsers, so the widget must identify as a desktop browser.
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
	AppleWebKit/537.36 (KHTML, like Gecko) Chrome/107.0.0.0 Safari/537.36";

/// Fully owned webview-session configuration.
///
/// The bridge never interprets these values; the widget layer applies them
/// when mounting the hidden webview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
	/// Forum base origin, e.g. `https://forum.example.com`.
	pub base_url: String,
	/// Path of the sign-in endpoint loaded to establish authenticated
	/// cookies.
	pub signin_path: String,
	/// User-agent string the widget presents.
	pub user_agent: String,
}

impl SessionConfig {
	/// Creates a config with the default sign-in path and desktop
	/// user-agent.
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			signin_path: "/signin".to_string(),
			user_agent: DESKTOP_USER_AGENT.to_string(),
		}
	}

	/// Full URL of the sign-in endpoint the widget loads.
	pub fn signin_url(&self) -> String {
		format!("{}{}", self.base_url, self.signin_path)
	}
}
