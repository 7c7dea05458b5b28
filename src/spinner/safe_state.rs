// src/spinner/safe_state.rs
//! Thread-safe wrapper for spinner state.

use super::signal::lock;
use super::state::{Outcome, Phase, SpinnerState};
use std::sync::{Condvar, Mutex, PoisonError};
use std::time::Duration;

/// `SpinnerState` behind a mutex, plus the condvar the animation thread sleeps
/// on. The condvar is notified exactly once, on the terminal transition.
pub struct SafeState {
    inner: Mutex<SpinnerState>,
    stopped: Condvar,
}

impl SafeState {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(SpinnerState::new(message)),
            stopped: Condvar::new(),
        }
    }

    /// Access the state with a closure for modification.
    pub fn modify<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SpinnerState) -> R,
    {
        let mut guard = lock(&self.inner);
        f(&mut guard)
    }

    /// Applies the terminal transition and wakes the animation thread if this
    /// call performed it.
    pub fn finish(&self, outcome: Outcome, message: String) -> bool {
        let mut guard = lock(&self.inner);
        let changed = guard.finish(outcome, message);
        if changed {
            self.stopped.notify_all();
        }
        changed
    }

    /// Sleeps for one frame, returning early with true once the spinner stops.
    pub fn wait_for_stop(&self, timeout: Duration) -> bool {
        let guard = lock(&self.inner);
        let (guard, _) = self
            .stopped
            .wait_timeout_while(guard, timeout, |s| !s.phase().is_stopped())
            .unwrap_or_else(PoisonError::into_inner);
        guard.phase().is_stopped()
    }

    #[must_use]
    pub fn status(&self) -> String {
        lock(&self.inner).status().to_string()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        lock(&self.inner).phase().clone()
    }

    #[must_use]
    pub fn message(&self) -> String {
        lock(&self.inner).message().to_string()
    }
}
