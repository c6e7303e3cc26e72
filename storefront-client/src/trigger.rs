//! Debounced refresh triggers
//!
//! Page lifecycle events (focus, visibility, history restore, resize) all
//! funnel into [`RenderTrigger::invalidate`]. A burst of invalidations inside
//! one quiet window produces a single refresh, run after the window closes.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Trailing-edge debounce state machine
///
/// Pure: callers pass the current time in.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Note an event at `now`, pushing the deadline out
    pub fn record(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// `true` exactly once per burst, when the deadline has passed
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop a pending burst; returns whether there was one
    pub fn take(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}

/// What asked for a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    WindowFocus,
    VisibilityVisible,
    /// Page shown again from the back/forward cache
    PageRestored,
    Resize,
    /// Another part of the application changed the cart
    External,
}

/// Work run once per debounced burst
#[async_trait]
pub trait RefreshTarget: Send + Sync {
    async fn refresh(&self);
}

/// Debounced entry point for one kind of refresh
pub struct RenderTrigger {
    name: &'static str,
    debouncer: Mutex<Debouncer>,
    wake: Notify,
    shutdown: AtomicBool,
    invalidations: AtomicU64,
    runs: AtomicU64,
    target: Arc<dyn RefreshTarget>,
}

impl std::fmt::Debug for RenderTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderTrigger")
            .field("name", &self.name)
            .field("debouncer", &*self.debouncer.lock())
            .field("invalidations", &self.invalidation_count())
            .field("runs", &self.run_count())
            .finish()
    }
}

impl RenderTrigger {
    pub fn new(name: &'static str, window: Duration, target: Arc<dyn RefreshTarget>) -> Arc<Self> {
        Arc::new(Self {
            name,
            debouncer: Mutex::new(Debouncer::new(window)),
            wake: Notify::new(),
            shutdown: AtomicBool::new(false),
            invalidations: AtomicU64::new(0),
            runs: AtomicU64::new(0),
            target,
        })
    }

    pub fn invalidate(&self, source: TriggerSource) {
        self.debouncer.lock().record(Instant::now());
        self.invalidations.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(trigger = self.name, ?source, "Invalidated");
        self.wake.notify_one();
    }

    pub fn on_focus(&self) {
        self.invalidate(TriggerSource::WindowFocus);
    }

    /// Only a page becoming visible counts
    pub fn on_visibility_change(&self, hidden: bool) {
        if !hidden {
            self.invalidate(TriggerSource::VisibilityVisible);
        }
    }

    /// Only a restore from the history cache counts
    pub fn on_page_show(&self, persisted: bool) {
        if persisted {
            self.invalidate(TriggerSource::PageRestored);
        }
    }

    pub fn on_resize(&self) {
        self.invalidate(TriggerSource::Resize);
    }

    pub fn notify_external(&self) {
        self.invalidate(TriggerSource::External);
    }

    pub fn invalidation_count(&self) -> u64 {
        self.invalidations.load(Ordering::Relaxed)
    }

    pub fn run_count(&self) -> u64 {
        self.runs.load(Ordering::Relaxed)
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.lock().is_pending()
    }

    /// Run a pending refresh now instead of waiting out the window
    pub async fn flush(&self) -> bool {
        if !self.debouncer.lock().take() {
            return false;
        }
        self.run().await;
        true
    }

    async fn run(&self) {
        self.runs.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(trigger = self.name, "Running debounced refresh");
        self.target.refresh().await;
    }

    /// Start the worker that fires the refresh when a window closes
    pub fn spawn(self: &Arc<Self>) -> JoinHandle<()> {
        let trigger = Arc::clone(self);
        tokio::spawn(async move { trigger.worker().await })
    }

    /// Stop the worker; a pending burst is dropped
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
        self.wake.notify_one();
    }

    async fn worker(&self) {
        loop {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::debug!(trigger = self.name, "Trigger worker stopped");
                return;
            }
            let deadline = self.debouncer.lock().deadline();
            match deadline {
                None => self.wake.notified().await,
                Some(deadline) => {
                    tokio::select! {
                        _ = tokio::time::sleep_until(deadline) => {
                            let due = self.debouncer.lock().poll(Instant::now());
                            if due {
                                self.run().await;
                            }
                        }
                        _ = self.wake.notified() => {}
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debouncer_collapses_burst() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        assert!(!debouncer.poll(start));

        debouncer.record(start);
        debouncer.record(start + Duration::from_millis(40));
        debouncer.record(start + Duration::from_millis(80));

        assert!(!debouncer.poll(start + Duration::from_millis(150)));
        assert!(debouncer.poll(start + Duration::from_millis(180)));
        assert!(!debouncer.poll(start + Duration::from_millis(500)));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_debouncer_take() {
        let mut debouncer = Debouncer::new(Duration::from_millis(250));
        assert!(!debouncer.take());
        debouncer.record(Instant::now());
        assert!(debouncer.take());
        assert_eq!(debouncer.deadline(), None);
    }
}
