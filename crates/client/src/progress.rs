//! In-flight request tracking for a global loading indicator.
//!
//! A [`ProgressTracker`] owns the pending-request count and the
//! [`ProgressIndicator`] it drives. It is an ordinary value, shared through an
//! `Arc`, so every interception point that should move the indicator is handed
//! the same tracker explicitly:
//!
//! - the envelope client, through [`crate::ProgressInterceptor`];
//! - raw transport calls, through [`crate::TrackedTransport`];
//! - any other unit of work, through [`ProgressTracker::track`];
//! - third-party request-event systems, through [`ProgressTracker::handle`].
//!
//! Each point pairs one `begin` with one `end`, so the indicator is hidden
//! exactly when the last outstanding operation settles, whatever the
//! settlement order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

// ---------------------------------------------------------------------------
// Indicator port
// ---------------------------------------------------------------------------

/// Something that can be shown while requests are pending.
///
/// Calls arrive with the tracker's lock held, so implementations must not call
/// back into the [`ProgressTracker`] that drives them.
pub trait ProgressIndicator: Send + Sync {
    /// The first request started.
    fn show(&self);

    /// The last outstanding request settled. May be called when already hidden.
    fn hide(&self);
}

/// Indicator that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopIndicator;

impl ProgressIndicator for NoopIndicator {
    fn show(&self) {}
    fn hide(&self) {}
}

/// Indicator that emits a `tracing` event on every transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingIndicator;

impl ProgressIndicator for LoggingIndicator {
    fn show(&self) {
        debug!("Loading indicator shown");
    }

    fn hide(&self) {
        debug!("Loading indicator hidden");
    }
}

// ---------------------------------------------------------------------------
// Events from external request systems
// ---------------------------------------------------------------------------

/// Lifecycle events reported by a request system the client does not own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageEvent {
    /// A request is about to be issued.
    BeforeRequest,
    /// A previously announced request completed (successfully or not).
    AfterRequest,
    /// The page was restored from history without issuing any request.
    HistoryRestore,
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Counts pending requests and shows the indicator while the count is positive.
pub struct ProgressTracker {
    pending: Mutex<usize>,
    indicator: Arc<dyn ProgressIndicator>,
}

impl ProgressTracker {
    /// Creates a tracker with no pending requests driving `indicator`.
    pub fn new(indicator: Arc<dyn ProgressIndicator>) -> Self {
        Self {
            pending: Mutex::new(0),
            indicator,
        }
    }

    /// Creates a tracker whose indicator does nothing.
    pub fn silent() -> Self {
        Self::new(Arc::new(NoopIndicator))
    }

    /// Records the start of a request, showing the indicator if none was pending.
    pub fn begin(&self) {
        let mut pending = self.lock();
        if *pending == 0 {
            self.indicator.show();
        }
        *pending += 1;
    }

    /// Records the end of a request, hiding the indicator once none are pending.
    ///
    /// An unmatched call clamps the count at zero rather than underflowing.
    pub fn end(&self) {
        let mut pending = self.lock();
        *pending = pending.saturating_sub(1);
        if *pending == 0 {
            self.indicator.hide();
        }
    }

    /// Number of requests currently pending.
    pub fn pending(&self) -> usize {
        *self.lock()
    }

    /// Flashes the indicator and forgets every pending request.
    ///
    /// Used when the page is restored from history: requests announced before
    /// the restore will never report their end.
    pub fn reset(&self) {
        let mut pending = self.lock();
        self.indicator.show();
        self.indicator.hide();
        if *pending != 0 {
            debug!(pending = *pending, "Discarding pending requests on reset");
        }
        *pending = 0;
    }

    /// Begins a request and returns a guard that ends it when dropped.
    pub fn track(self: &Arc<Self>) -> InFlight {
        self.begin();
        InFlight {
            tracker: Arc::clone(self),
        }
    }

    /// Applies an event from an external request system.
    pub fn handle(&self, event: PageEvent) {
        match event {
            PageEvent::BeforeRequest => self.begin(),
            PageEvent::AfterRequest => self.end(),
            PageEvent::HistoryRestore => self.reset(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        // The count is a plain integer; a panic in an indicator leaves it valid.
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

/// A pending request that ends when this guard is dropped.
#[must_use = "the request ends as soon as the guard is dropped"]
#[derive(Debug)]
pub struct InFlight {
    tracker: Arc<ProgressTracker>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.tracker.end();
    }
}
