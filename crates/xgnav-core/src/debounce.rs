//! Last-call-wins debouncing on the tokio timer
//!
//! A [`Debouncer`] owns at most one pending task. Every schedule, cancel or
//! immediate run bumps a generation counter; a task only runs if the
//! generation it was scheduled under is still current when it takes the
//! lock. Aborting the previous timer alone is not enough on a multi-threaded
//! runtime, where the task may already be past its delay on another worker.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Delay between the last keystroke and the search re-render
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl Slot {
    /// Invalidate whatever is scheduled and hand back its timer
    fn supersede(&mut self) -> Option<JoinHandle<()>> {
        self.generation = self.generation.wrapping_add(1);
        self.handle.take()
    }
}

/// Owner of a single cancellable timer task
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    slot: Arc<Mutex<Slot>>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl Debouncer {
    /// Create debouncer with a fixed delay
    #[inline]
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// Configured delay
    #[inline]
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` after the delay unless another call supersedes it
    ///
    /// `task` runs with the debouncer locked and must not call back into
    /// it. Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        let shared = Arc::clone(&self.slot);

        let mut slot = self.slot.lock();
        if let Some(previous) = slot.supersede() {
            previous.abort();
        }
        let generation = slot.generation;
        slot.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let slot = shared.lock();
            if slot.generation == generation {
                task();
            }
        }));
    }

    /// Drop the pending task and run `task` now, in its place
    ///
    /// Nothing scheduled earlier can run after this returns.
    pub fn run_now<R>(&self, task: impl FnOnce() -> R) -> R {
        let mut slot = self.slot.lock();
        if let Some(previous) = slot.supersede() {
            previous.abort();
        }
        task()
    }

    /// Cancel the pending task; returns whether one was still waiting
    pub fn cancel(&self) -> bool {
        match self.slot.lock().supersede() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    /// Wait until the pending task, if any, has run
    ///
    /// Returns at once when nothing is scheduled. A task superseded while
    /// waiting does not run.
    pub async fn flush(&self) {
        let handle = self.slot.lock().handle.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::debug!(error = %e, "debounced task did not complete");
            }
        }
    }

    /// Whether a scheduled task has not run yet
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot
            .lock()
            .handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.slot.lock().supersede() {
            handle.abort();
        }
    }
}
