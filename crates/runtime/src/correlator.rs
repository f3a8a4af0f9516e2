//! Pending-request registry keyed by correlation id.
//!
//! Every injected request registers a settlement slot here before its
//! script runs; the first inbound message carrying the matching id settles
//! and removes it. Lookups are by exact id equality and independent of
//! arrival order.

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use periscope_protocol::parse_inbound;

use crate::error::{Error, Result};

/// A settlement slot handed back to the caller at registration.
pub type Settlement = oneshot::Receiver<Result<Value>>;

/// Registry of pending requests awaiting their inbound result message.
#[derive(Default)]
pub struct Correlator {
	pending: DashMap<Arc<str>, oneshot::Sender<Result<Value>>>,
}

impl Correlator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a pending request and returns its settlement slot.
	///
	/// Ids must be unique among concurrently pending requests; a collision
	/// replaces the earlier entry, whose settlement slot then reports the
	/// bridge as closed.
	pub fn register(&self, id: &str) -> Settlement {
		let (tx, rx) = oneshot::channel();
		if self.pending.insert(Arc::from(id), tx).is_some() {
			warn!(target = "periscope", id, "correlation id collision, replacing earlier entry");
		}
		rx
	}

	/// Routes one raw inbound payload to its pending request.
	///
	/// Anything that does not parse as a JSON object with a string `id` is
	/// dropped as non-correlated traffic; a parsed id with no pending entry
	/// (stale, duplicate, or foreign) is discarded silently. Neither case
	/// affects other pending requests.
	pub fn dispatch(&self, raw: &str) {
		let Some(message) = parse_inbound(raw) else {
			debug!(target = "periscope", "dropping non-correlated webview message");
			return;
		};

		let Some((_, slot)) = self.pending.remove(message.id.as_str()) else {
			debug!(
				target = "periscope",
				id = %message.id,
				"dropping message with no pending request"
			);
			return;
		};

		// The caller may have stopped listening; that is not an error here.
		let _ = slot.send(message.into_outcome().map_err(Error::Remote));
	}

	/// Removes one entry without settling it. Used for TTL eviction after
	/// the caller has already given up on the slot.
	pub fn discard(&self, id: &str) {
		self.pending.remove(id);
	}

	/// Fails every pending request with [`Error::SessionReloaded`].
	///
	/// Called by the facade when the session reloads: the scripts those
	/// requests injected died with the old webview, so their messages will
	/// never arrive.
	pub fn reject_all(&self) {
		let ids: Vec<Arc<str>> = self.pending.iter().map(|entry| entry.key().clone()).collect();
		for id in ids {
			if let Some((_, slot)) = self.pending.remove(&id) {
				let _ = slot.send(Err(Error::SessionReloaded));
			}
		}
	}

	/// Number of requests currently awaiting a message.
	pub fn pending_len(&self) -> usize {
		self.pending.len()
	}
}
