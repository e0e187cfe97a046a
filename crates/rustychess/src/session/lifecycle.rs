//! Readiness of the session's decision engine.

use super::error::SessionError;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Where the engine is in its construction.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineStatus {
    /// Construction has not been requested.
    #[display("uninitialized")]
    Uninitialized,
    /// Construction is running.
    #[display("loading")]
    Loading,
    /// The engine accepts requests.
    #[display("ready")]
    Ready,
    /// Construction failed. Terminal for the session.
    #[display("failed ({})", _0)]
    Failed(String),
}

impl EngineStatus {
    /// Whether moves can be submitted.
    pub fn is_ready(&self) -> bool {
        matches!(self, EngineStatus::Ready)
    }

    /// Whether construction has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        matches!(self, EngineStatus::Ready | EngineStatus::Failed(_))
    }
}

/// Single-flight state machine: `Uninitialized -> Loading -> Ready | Failed`.
///
/// Every transition is guarded on the current state, so repeated or
/// out-of-order requests are no-ops. Observers subscribe to a watch channel.
#[derive(Debug)]
pub struct EngineLifecycle {
    status: watch::Sender<EngineStatus>,
}

impl Default for EngineLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineLifecycle {
    /// Creates a lifecycle in `Uninitialized`.
    pub fn new() -> Self {
        let (status, _) = watch::channel(EngineStatus::Uninitialized);
        Self { status }
    }

    /// Moves to `Loading`. Returns false (and changes nothing) unless the
    /// engine was `Uninitialized`.
    #[instrument(skip(self))]
    pub fn begin_loading(&self) -> bool {
        let started = self.transition(|status| {
            matches!(status, EngineStatus::Uninitialized).then_some(EngineStatus::Loading)
        });
        if started {
            info!("Engine construction started");
        } else {
            debug!(status = %self.status(), "Engine load already requested");
        }
        started
    }

    /// Moves `Loading -> Ready`.
    #[instrument(skip(self))]
    pub fn mark_ready(&self) -> bool {
        let done = self.transition(|status| {
            matches!(status, EngineStatus::Loading).then_some(EngineStatus::Ready)
        });
        if done {
            info!("Engine ready");
        }
        done
    }

    /// Moves `Loading -> Failed(reason)`.
    #[instrument(skip(self))]
    pub fn mark_failed(&self, reason: String) -> bool {
        let done = self.transition(|status| {
            matches!(status, EngineStatus::Loading).then(|| EngineStatus::Failed(reason.clone()))
        });
        if done {
            warn!(%reason, "Engine construction failed");
        }
        done
    }

    /// Current status.
    pub fn status(&self) -> EngineStatus {
        self.status.borrow().clone()
    }

    /// Receiver that observes every status change.
    pub fn subscribe(&self) -> watch::Receiver<EngineStatus> {
        self.status.subscribe()
    }

    /// Admits a request only when the engine is `Ready`.
    pub fn ensure_ready(&self) -> Result<(), SessionError> {
        match self.status() {
            EngineStatus::Ready => Ok(()),
            EngineStatus::Failed(reason) => Err(SessionError::EngineLoadFailure(reason)),
            other => Err(SessionError::EngineNotReady(other)),
        }
    }

    /// Waits until the engine is `Ready` or `Failed` and returns that status.
    ///
    /// Returns immediately with the current status if loading was never
    /// requested.
    pub async fn wait_until_settled(&self) -> EngineStatus {
        let mut rx = self.subscribe();
        if matches!(*rx.borrow(), EngineStatus::Uninitialized) {
            return self.status();
        }
        match rx.wait_for(EngineStatus::is_settled).await {
            Ok(status) => status.clone(),
            Err(_) => self.status(),
        }
    }

    fn transition(&self, next: impl FnOnce(&EngineStatus) -> Option<EngineStatus>) -> bool {
        self.status.send_if_modified(|status| match next(status) {
            Some(new_status) => {
                *status = new_status;
                true
            }
            None => false,
        })
    }
}
