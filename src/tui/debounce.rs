use std::pin::Pin;
use std::time::Duration;
use tokio::time::{Sleep, sleep};

/// Cancellable deferred invocation keyed by a single pending timer.
/// `schedule` replaces any pending timer, so at most one is live; a
/// term only fires after a full quiet period. Dropping the debouncer
/// cancels the pending timer.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(Pin<Box<Sleep>>, String)>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn schedule(&mut self, term: String) {
        self.pending = Some((Box::pin(sleep(self.delay)), term));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolves with the settled term once the quiet period elapses.
    /// Never resolves while unarmed, and is cancellation safe: losing
    /// a select race leaves the pending timer in place.
    pub async fn fired(&mut self) -> String {
        if let Some((timer, _)) = self.pending.as_mut() {
            timer.as_mut().await;
            if let Some((_, term)) = self.pending.take() {
                return term;
            }
        }
        std::future::pending().await
    }
}
