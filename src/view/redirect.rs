use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::router::Route;

/// A redirect that fired, tagged with the generation of the view that
/// scheduled it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub generation: u64,
    pub to: Route,
}

/// Hands out redirect timers that report back to one session.
#[derive(Debug, Clone)]
pub struct RedirectScheduler {
    delay: Duration,
    events: mpsc::UnboundedSender<Redirect>,
}

impl RedirectScheduler {
    pub fn new(delay: Duration, events: mpsc::UnboundedSender<Redirect>) -> Self {
        Self { delay, events }
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, generation: u64, to: Route) -> RedirectGuard {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let events = self.events.clone();
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = cancelled.cancelled() => {
                    tracing::debug!(generation, "redirect cancelled");
                }
                () = tokio::time::sleep(delay) => {
                    tracing::info!(generation, to = %to, "redirecting");
                    if events.send(Redirect { generation, to }).is_err() {
                        tracing::debug!(generation, "redirect dropped: session closed");
                    }
                }
            }
        });

        RedirectGuard { token }
    }
}

/// Owns a pending redirect. Dropping the guard cancels it.
#[derive(Debug)]
pub struct RedirectGuard {
    token: CancellationToken,
}

impl RedirectGuard {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for RedirectGuard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scheduler = RedirectScheduler::new(Duration::from_millis(1200), tx);
        let _guard = scheduler.schedule(7, Route::Home);

        tokio::time::sleep(Duration::from_millis(1199)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(
            rx.recv().await,
            Some(Redirect {
                generation: 7,
                to: Route::Home
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_guard_cancels() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scheduler = RedirectScheduler::new(Duration::from_millis(1200), tx);
        let guard = scheduler.schedule(1, Route::Home);
        drop(guard);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn explicit_cancel_marks_guard() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scheduler = RedirectScheduler::new(Duration::from_millis(10), tx);
        let guard = scheduler.schedule(1, Route::Home);
        assert!(!guard.is_cancelled());
        guard.cancel();
        assert!(guard.is_cancelled());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_err());
    }
}
