// src/spinner/client.rs
//! The per-task spinner handle passed to workers.

use super::safe_state::SafeState;
use super::signal::{Cancellation, Pulse};
use super::state::{Completion, Outcome, Phase};
use std::sync::{Arc, Weak};
use std::thread;
use std::time::Duration;

/// A single animated status line. Cheap to clone; all clones share state.
#[derive(Clone)]
pub struct Spinner {
    shared: Arc<Shared>,
}

struct Shared {
    name: Option<String>,
    done_message: String,
    state: SafeState,
    frames: Arc<[String]>,
    frame_interval: Duration,
    cancel: Weak<Cancellation>,
    settled: Weak<Pulse>,
}

impl Spinner {
    pub(crate) fn new(
        name: Option<String>,
        message: String,
        done_message: String,
        frames: Arc<[String]>,
        frame_interval: Duration,
        cancel: &Arc<Cancellation>,
        settled: &Arc<Pulse>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                name,
                done_message,
                state: SafeState::new(message),
                frames,
                frame_interval,
                cancel: Arc::downgrade(cancel),
                settled: Arc::downgrade(settled),
            }),
        }
    }

    /// Starts the animation. Only the first call on a pending spinner has any
    /// effect; running or stopped spinners are left alone.
    ///
    /// Returns true if this call started the spinner.
    pub fn start(&self) -> bool {
        let frames = &self.shared.frames;
        if !self.shared.state.modify(|s| s.begin(frames)) {
            return false;
        }
        log::trace!("spinner '{}' started", self.label());

        let shared = Arc::clone(&self.shared);
        thread::spawn(move || animate(&shared));
        true
    }

    /// Stops with the preconfigured completion message.
    ///
    /// Returns true if this call stopped the spinner, false if it was already stopped.
    pub fn stop(&self) -> bool {
        self.shared.finish(Outcome::Done, self.shared.done_message.clone())
    }

    /// Stops with an explicit outcome and message. `outcome` accepts an
    /// [`Outcome`] or a tag such as `"success"`, `"failure"`, `"disruption"`
    /// or `"done"`.
    ///
    /// Returns true if this call stopped the spinner, false if it was already stopped.
    pub fn stop_with_outcome(
        &self,
        outcome: impl Into<Outcome>,
        message: impl Into<String>,
    ) -> bool {
        self.shared.finish(outcome.into(), message.into())
    }

    /// Replaces the display message; a running spinner shows it immediately.
    pub fn set_message(&self, message: impl Into<String>) {
        let message = message.into();
        let frames = &self.shared.frames;
        self.shared.state.modify(|s| {
            if !s.phase().is_stopped() {
                s.set_message(message, frames);
            }
        });
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.shared.name.as_deref()
    }

    #[must_use]
    pub fn message(&self) -> String {
        self.shared.state.message()
    }

    #[must_use]
    pub fn done_message(&self) -> &str {
        &self.shared.done_message
    }

    /// Current rendered status line; empty while pending.
    #[must_use]
    pub fn status(&self) -> String {
        self.shared.state.status()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.shared.state.phase()
    }

    #[must_use]
    pub fn completion(&self) -> Option<Completion> {
        match self.phase() {
            Phase::Stopped(c) => Some(c),
            Phase::Pending | Phase::Running => None,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.phase().is_stopped()
    }

    fn label(&self) -> String {
        self.shared.label()
    }
}

impl std::fmt::Debug for Spinner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spinner")
            .field("name", &self.shared.name)
            .field("done_message", &self.shared.done_message)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

impl Shared {
    fn finish(&self, outcome: Outcome, message: String) -> bool {
        let tag = outcome.tag().to_string();
        if !self.state.finish(outcome, message) {
            return false;
        }
        log::trace!("spinner '{}' stopped ({tag})", self.label());
        // Bumped outside the state lock: waiters take the group lock next.
        if let Some(settled) = self.settled.upgrade() {
            settled.bump();
        }
        true
    }

    /// `None` once the owning group is gone.
    fn group_signal(&self) -> Option<Option<String>> {
        let cancel = self.cancel.upgrade()?;
        Some(cancel.reason().map(str::to_owned))
    }

    fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.state.message())
    }
}

fn animate(shared: &Shared) {
    loop {
        match shared.group_signal() {
            None => {
                log::trace!("spinner '{}' orphaned, animation ends", shared.label());
                return;
            }
            Some(Some(reason)) => {
                shared.finish(Outcome::Disrupted, reason);
                return;
            }
            Some(None) => {}
        }
        if shared.state.wait_for_stop(shared.frame_interval) {
            return;
        }
        let frames = &shared.frames;
        if !shared.state.modify(|s| s.advance(frames)) {
            return;
        }
    }
}
