// src/spinner/signal.rs
//! One-shot and broadcast signalling primitives shared between threads.

use std::sync::{Condvar, Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::{Duration, Instant};

pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One-shot latch. Firing is idempotent; waiters wake once it has fired.
#[derive(Debug, Default)]
pub struct Latch {
    fired: Mutex<bool>,
    cond: Condvar,
}

impl Latch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true only for the call that actually fired the latch.
    pub fn fire(&self) -> bool {
        let mut fired = lock(&self.fired);
        if *fired {
            return false;
        }
        *fired = true;
        self.cond.notify_all();
        true
    }

    #[must_use]
    pub fn is_fired(&self) -> bool {
        *lock(&self.fired)
    }

    /// Sleeps up to `timeout`, returning early with true if the latch fires.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let guard = lock(&self.fired);
        let (guard, _) = self
            .cond
            .wait_timeout_while(guard, timeout, |fired| !*fired)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

/// Group-wide cancellation carrying the disruption reason. The first reason wins.
#[derive(Debug, Default)]
pub struct Cancellation {
    reason: OnceLock<String>,
}

impl Cancellation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Triggers the cancellation. Returns false if it had already been triggered.
    pub fn cancel(&self, reason: impl Into<String>) -> bool {
        self.reason.set(reason.into()).is_ok()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.reason.get().is_some()
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.get().map(String::as_str)
    }
}

/// Generation counter bumped whenever a spinner reaches its terminal state.
/// Waiters re-check their own condition after every bump.
#[derive(Debug, Default)]
pub struct Pulse {
    generation: Mutex<u64>,
    cond: Condvar,
}

impl Pulse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bump(&self) {
        let mut generation = lock(&self.generation);
        *generation = generation.wrapping_add(1);
        self.cond.notify_all();
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        *lock(&self.generation)
    }

    /// Blocks until the generation differs from `seen` or `deadline` passes.
    /// Returns false on timeout.
    pub fn wait_past(&self, seen: u64, deadline: Option<Instant>) -> bool {
        let mut generation = lock(&self.generation);
        while *generation == seen {
            match deadline {
                None => {
                    generation = self
                        .cond
                        .wait(generation)
                        .unwrap_or_else(PoisonError::into_inner);
                }
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return false;
                    }
                    generation = self
                        .cond
                        .wait_timeout(generation, deadline - now)
                        .unwrap_or_else(PoisonError::into_inner)
                        .0;
                }
            }
        }
        true
    }
}
