//! Webview session lifecycle.
//!
//! A session spans one or more *generations*: the lifetime between one
//! widget mount and the next reload. Readiness is tracked per generation
//! over a watch channel, so a load failure is broadcast to every waiter of
//! that generation, settled waiters keep their outcome across reloads, and
//! new waiters after a reload park on the fresh generation.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::webview::WebviewHandle;

#[derive(Debug, Clone, PartialEq)]
enum Phase {
	Loading,
	Ready,
	Failed(String),
}

#[derive(Debug, Clone)]
struct Lifecycle {
	generation: u64,
	phase: Phase,
}

/// Owns the embedded webview's load lifecycle and gates outbound traffic.
///
/// One session exists per process, owned by the bridge facade and handed
/// around by `Arc`. The widget drives [`notify_loaded`](Self::notify_loaded)
/// and [`notify_load_error`](Self::notify_load_error) through its event
/// channel.
pub struct Session {
	webview: Arc<dyn WebviewHandle>,
	lifecycle: watch::Sender<Lifecycle>,
}

impl Session {
	/// Creates a session for a freshly mounted widget, starting in the
	/// loading phase of generation 1.
	pub fn new(webview: Arc<dyn WebviewHandle>) -> Self {
		let (lifecycle, _) = watch::channel(Lifecycle {
			generation: 1,
			phase: Phase::Loading,
		});
		Self { webview, lifecycle }
	}

	/// Resolves once the current generation signals a successful load.
	///
	/// # Errors
	///
	/// - [`Error::LoadFailed`] if this generation's load fails; the failure
	///   is broadcast to every current and future waiter of the generation
	/// - [`Error::SessionReloaded`] if [`reload`](Self::reload) tears the
	///   generation down while waiting
	pub async fn when_ready(&self) -> Result<()> {
		let mut rx = self.lifecycle.subscribe();
		let generation = rx.borrow().generation;

		loop {
			{
				let lifecycle = rx.borrow_and_update();
				if lifecycle.generation != generation {
					return Err(Error::SessionReloaded);
				}
				match &lifecycle.phase {
					Phase::Ready => return Ok(()),
					Phase::Failed(reason) => {
						return Err(Error::LoadFailed {
							reason: reason.clone(),
						});
					}
					Phase::Loading => {}
				}
			}

			if rx.changed().await.is_err() {
				return Err(Error::Closed);
			}
		}
	}

	/// Returns true when the current generation has signalled ready.
	pub fn is_ready(&self) -> bool {
		self.lifecycle.borrow().phase == Phase::Ready
	}

	/// Current generation number; bumped by every [`reload`](Self::reload).
	pub fn generation(&self) -> u64 {
		self.lifecycle.borrow().generation
	}

	/// Starts a new generation and remounts the widget.
	///
	/// Waiters parked on the torn-down generation reject with
	/// [`Error::SessionReloaded`]; waiters that already settled keep their
	/// outcome. New [`when_ready`](Self::when_ready) calls park on the
	/// fresh generation.
	pub fn reload(&self) {
		self.lifecycle.send_modify(|lifecycle| {
			lifecycle.generation += 1;
			lifecycle.phase = Phase::Loading;
		});
		debug!(
			target = "periscope",
			generation = self.generation(),
			"reloading webview session"
		);
		self.webview.reload();
	}

	/// Clears the webview's cache and cookies, independent of readiness.
	pub fn clear_cache(&self) {
		debug!(target = "periscope", "clearing webview cache and cookies");
		self.webview.clear_cache();
	}

	/// Marks the current generation ready. Ignored unless it is loading.
	pub fn notify_loaded(&self) {
		let applied = self.lifecycle.send_if_modified(|lifecycle| {
			if lifecycle.phase == Phase::Loading {
				lifecycle.phase = Phase::Ready;
				true
			} else {
				false
			}
		});
		if applied {
			debug!(
				target = "periscope",
				generation = self.generation(),
				"webview session ready"
			);
		}
	}

	/// Fails the current generation. Ignored unless it is loading.
	pub fn notify_load_error(&self, reason: impl Into<String>) {
		let reason = reason.into();
		let applied = self.lifecycle.send_if_modified(|lifecycle| {
			if lifecycle.phase == Phase::Loading {
				lifecycle.phase = Phase::Failed(reason.clone());
				true
			} else {
				false
			}
		});
		if applied {
			warn!(
				target = "periscope",
				generation = self.generation(),
				reason = %reason,
				"webview session failed to load"
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;

	#[derive(Default)]
	struct CountingWebview {
		reloads: AtomicUsize,
		cache_clears: AtomicUsize,
	}

	impl WebviewHandle for CountingWebview {
		fn inject_script(&self, _script: &str) {}

		fn reload(&self) {
			self.reloads.fetch_add(1, Ordering::SeqCst);
		}

		fn clear_cache(&self) {
			self.cache_clears.fetch_add(1, Ordering::SeqCst);
		}
	}

	fn session() -> (Session, Arc<CountingWebview>) {
		let webview = Arc::new(CountingWebview::default());
		(Session::new(webview.clone()), webview)
	}

	#[tokio::test]
	async fn when_ready_resolves_after_load_finishes() {
		let (session, _) = session();
		let session = Arc::new(session);

		let waiter = tokio::spawn({
			let session = session.clone();
			async move { session.when_ready().await }
		});

		session.notify_loaded();
		waiter.await.unwrap().unwrap();
		assert!(session.is_ready());
	}

	#[tokio::test]
	async fn when_ready_after_ready_resolves_immediately() {
		let (session, _) = session();
		session.notify_loaded();
		session.when_ready().await.unwrap();
	}

	#[tokio::test]
	async fn load_failure_is_broadcast_to_all_waiters() {
		let (session, _) = session();
		let session = Arc::new(session);

		let first = tokio::spawn({
			let session = session.clone();
			async move { session.when_ready().await }
		});
		let second = tokio::spawn({
			let session = session.clone();
			async move { session.when_ready().await }
		});

		session.notify_load_error("network unreachable");

		for waiter in [first, second] {
			let err = waiter.await.unwrap().unwrap_err();
			assert!(matches!(err, Error::LoadFailed { ref reason } if reason == "network unreachable"));
		}

		// Future waiters of the same generation reject the same way.
		assert!(matches!(
			session.when_ready().await,
			Err(Error::LoadFailed { .. })
		));
	}

	#[tokio::test]
	async fn reload_starts_a_fresh_generation() {
		let (session, webview) = session();
		session.notify_loaded();
		assert_eq!(session.generation(), 1);

		session.reload();
		assert_eq!(session.generation(), 2);
		assert_eq!(webview.reloads.load(Ordering::SeqCst), 1);
		assert!(!session.is_ready());

		// The failed generation is gone; the new one can go ready.
		session.notify_loaded();
		session.when_ready().await.unwrap();
	}

	#[tokio::test]
	async fn reload_rejects_parked_waiters() {
		let (session, _) = session();
		let session = Arc::new(session);

		let waiter = tokio::spawn({
			let session = session.clone();
			async move { session.when_ready().await }
		});

		// Let the waiter park before tearing the generation down.
		tokio::task::yield_now().await;
		session.reload();

		assert!(matches!(
			waiter.await.unwrap(),
			Err(Error::SessionReloaded)
		));
	}

	#[tokio::test]
	async fn stale_lifecycle_signals_are_ignored() {
		let (session, _) = session();
		session.notify_loaded();

		// A late error after ready must not flip the session.
		session.notify_load_error("stale");
		assert!(session.is_ready());

		// A duplicate ready is a no-op.
		session.notify_loaded();
		session.when_ready().await.unwrap();
	}

	#[tokio::test]
	async fn clear_cache_delegates_to_widget() {
		let (session, webview) = session();
		session.clear_cache();
		session.clear_cache();
		assert_eq!(webview.cache_clears.load(Ordering::SeqCst), 2);
	}
}
