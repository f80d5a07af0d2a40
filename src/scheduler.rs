//! Deadline-driven refetch scheduling.
//!
//! The feed never polls on a fixed interval. Instead the scheduler owns at
//! most one armed timer, set to the moment the currently soonest race crosses
//! the staleness boundary — the earliest instant the displayed list could
//! become incorrect. When the timer fires it sends one refresh signal; the
//! decision to re-arm is made fresh from whatever data the resulting fetch
//! produces.
//!
//! Arming always cancels any prior timer first, and the scheduler disarms on
//! drop, so a cancelled or orphaned timer can never deliver its signal.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Owns the single pending refetch timer for one feed instance.
pub struct RefetchScheduler {
    refresh: mpsc::Sender<()>,
    armed: Option<ArmedRefetch>,
}

/// Handle to one armed timer: the deadline it was armed for, plus the token
/// that cancels it.
struct ArmedRefetch {
    deadline: DateTime<Utc>,
    cancel: CancellationToken,
}

impl RefetchScheduler {
    /// Create a scheduler that delivers fired deadlines on `refresh`.
    pub fn new(refresh: mpsc::Sender<()>) -> Self {
        Self { refresh, armed: None }
    }

    /// Arm the timer for `deadline`, cancelling any previously armed timer.
    ///
    /// The sleep duration is computed against the caller's `now` so that the
    /// same reference time drives both list filtering and scheduling. A
    /// deadline already in the past fires immediately.
    pub fn arm(&mut self, deadline: DateTime<Utc>, now: DateTime<Utc>) {
        self.disarm();

        let wait = (deadline - now).to_std().unwrap_or(std::time::Duration::ZERO);
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let refresh = self.refresh.clone();

        debug!(?deadline, ?wait, "arming refetch timer");
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    trace!("refetch timer cancelled");
                }
                _ = tokio::time::sleep(wait) => {
                    // Receiver gone means the feed is shutting down.
                    let _ = refresh.send(()).await;
                }
            }
        });

        self.armed = Some(ArmedRefetch { deadline, cancel });
    }

    /// Cancel any pending timer without arming a replacement.
    pub fn disarm(&mut self) {
        if let Some(armed) = self.armed.take() {
            debug!(deadline = ?armed.deadline, "disarming refetch timer");
            armed.cancel.cancel();
        }
    }

    /// Whether a timer is currently armed.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// The deadline the current timer was armed for, if any.
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.armed.as_ref().map(|armed| armed.deadline)
    }
}

impl Drop for RefetchScheduler {
    fn drop(&mut self) {
        self.disarm();
    }
}
