//! Search input coalescing
//!
//! `Debouncer` is a clock-driven state machine: every `submit` cancels the
//! pending window and restarts it, and `poll` yields the latest value once
//! the window has elapsed. `DeferredTask` is the tokio-backed equivalent for
//! callers that want a callback to fire on its own.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Default quiescence window for search input
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(300);

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

// =============================================================================
// Debouncer
// =============================================================================

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Coalesces bursts of values into the last one of each burst.
#[derive(Debug)]
pub struct Debouncer<T, C: Clock = SystemClock> {
    clock: C,
    window: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T, SystemClock> {
    pub fn new(window: Duration) -> Self {
        Self::with_clock(window, SystemClock)
    }
}

impl<T, C: Clock> Debouncer<T, C> {
    pub fn with_clock(window: Duration, clock: C) -> Self {
        Self {
            clock,
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Replaces any pending value and restarts the window.
    pub fn submit(&mut self, value: T) {
        self.pending = Some(Pending {
            value,
            deadline: self.clock.now() + self.window,
        });
    }

    /// Drops the pending value, if any, without committing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Returns the pending value once its window has elapsed.
    pub fn poll(&mut self) -> Option<T> {
        let now = self.clock.now();
        let due = self.pending.as_ref().is_some_and(|p| now >= p.deadline);
        if due {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    /// Returns the pending value immediately, ignoring the window.
    pub fn flush(&mut self) -> Option<T> {
        self.cancel()
    }
}

// =============================================================================
// DeferredTask
// =============================================================================

/// A cancellable deferred callback on the tokio runtime.
///
/// Only the most recently scheduled future can run; scheduling again aborts
/// the previous one if it has not fired yet.
#[derive(Debug, Default)]
pub struct DeferredTask {
    handle: Option<JoinHandle<()>>,
}

impl DeferredTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `task` after `delay`, cancelling anything scheduled before.
    pub fn schedule<F>(&mut self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// True while a scheduled task has neither fired nor been cancelled.
    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DeferredTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
