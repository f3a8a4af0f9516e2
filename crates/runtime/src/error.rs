use periscope_protocol::RemoteError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	/// The webview failed to load its sign-in page. Broadcast to every
	/// current and future readiness waiter of the failed generation; fatal
	/// until the session is reloaded.
	#[error("webview failed to load: {reason}")]
	LoadFailed { reason: String },

	/// The session was reloaded while the operation was in flight.
	#[error("session reloaded while the operation was in flight")]
	SessionReloaded,

	/// The browser-side HTTP call failed. Local to one request.
	#[error(transparent)]
	Remote(#[from] RemoteError),

	/// A pending request outlived the configured TTL without receiving a
	/// matching message and was evicted.
	#[error("pending request {id} expired before a matching message arrived")]
	Expired { id: String },

	/// The bridge was torn down before the request settled.
	#[error("bridge closed before the request settled")]
	Closed,

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

impl Error {
	/// Returns the remote error snapshot when this is a browser-side failure.
	pub fn as_remote(&self) -> Option<&RemoteError> {
		match self {
			Error::Remote(remote) => Some(remote),
			_ => None,
		}
	}
}
