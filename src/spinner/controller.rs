// src/spinner/controller.rs
//! Lifecycle controller for a group of spinners.

use super::client::Spinner;
use super::handle::RenderHandle;
use super::render::Renderer;
use super::signal::{lock, Cancellation, Pulse};
use super::state::Outcome;
use crate::config::Config;
use crate::error::{Result, SpinnerError};
use crate::terminal::{AnsiTerminal, Terminal};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Group lifecycle: `Created -> Started -> Stopped`, each entered at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupPhase {
    Created,
    Started,
    Stopped,
}

struct GroupState {
    spinners: Vec<Spinner>,
    names: HashMap<String, Spinner>,
    phase: GroupPhase,
    renderer: Option<RenderHandle>,
}

struct GroupInner {
    state: Arc<Mutex<GroupState>>,
    cancel: Arc<Cancellation>,
    settled: Arc<Pulse>,
    terminal: Arc<dyn Terminal>,
    config: Config,
    frames: Arc<[String]>,
}

/// Owns an ordered block of spinners, renders them in place and coordinates
/// their shared lifecycle. Clones refer to the same group.
#[derive(Clone)]
pub struct SpinnerGroup {
    inner: Arc<GroupInner>,
}

impl Default for SpinnerGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinnerGroup {
    /// Creates an empty group drawing to stdout with default timings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self::with_terminal(config, Arc::new(AnsiTerminal::new()))
    }

    /// Creates an empty group drawing to `terminal`.
    #[must_use]
    pub fn with_terminal(config: Config, terminal: Arc<dyn Terminal>) -> Self {
        let frames: Arc<[String]> = config.frames.clone().into();
        Self {
            inner: Arc::new(GroupInner {
                state: Arc::new(Mutex::new(GroupState {
                    spinners: Vec::new(),
                    names: HashMap::new(),
                    phase: GroupPhase::Created,
                    renderer: None,
                })),
                cancel: Arc::new(Cancellation::new()),
                settled: Arc::new(Pulse::new()),
                terminal,
                config,
                frames,
            }),
        }
    }

    /// Appends an unnamed spinner. If the group is already started the
    /// spinner starts animating right away.
    pub fn add(&self, message: impl Into<String>, done_message: impl Into<String>) -> Spinner {
        let mut state = lock(&self.inner.state);
        self.push(&mut state, None, message.into(), done_message.into())
    }

    /// Appends a spinner that can later be looked up with [`SpinnerGroup::find`].
    ///
    /// # Errors
    /// Returns `DuplicateName` if a spinner with this name is already registered.
    pub fn add_named(
        &self,
        name: impl Into<String>,
        message: impl Into<String>,
        done_message: impl Into<String>,
    ) -> Result<Spinner> {
        let name = name.into();
        let mut state = lock(&self.inner.state);
        if state.names.contains_key(&name) {
            return Err(SpinnerError::DuplicateName(name));
        }
        Ok(self.push(&mut state, Some(name), message.into(), done_message.into()))
    }

    fn push(
        &self,
        state: &mut GroupState,
        name: Option<String>,
        message: String,
        done_message: String,
    ) -> Spinner {
        let spinner = Spinner::new(
            name.clone(),
            message,
            done_message,
            Arc::clone(&self.inner.frames),
            self.inner.config.frame_interval(),
            &self.inner.cancel,
            &self.inner.settled,
        );
        if let Some(name) = name {
            state.names.insert(name, spinner.clone());
        }
        state.spinners.push(spinner.clone());
        if state.phase == GroupPhase::Started {
            spinner.start();
        }
        spinner
    }

    /// Looks up a named spinner.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Spinner> {
        lock(&self.inner.state).names.get(name).cloned()
    }

    /// Hides the cursor, starts every registered spinner and spawns the
    /// redraw loop. Only the first call on a fresh group does anything.
    pub fn start(&self) {
        let mut state = lock(&self.inner.state);
        if state.phase != GroupPhase::Created {
            return;
        }
        state.phase = GroupPhase::Started;
        self.inner.terminal.hide_cursor();

        for spinner in &state.spinners {
            spinner.start();
        }

        // The loop re-reads the live list each tick so late additions show up.
        let shared = Arc::clone(&self.inner.state);
        let renderer = Renderer::new(Arc::clone(&self.inner.terminal));
        state.renderer = Some(RenderHandle::spawn(
            renderer,
            self.inner.config.tick_interval(),
            move || lock(&shared).spinners.iter().map(Spinner::status).collect(),
        ));
        log::debug!("spinner group started with {} spinners", state.spinners.len());
    }

    /// Broadcasts a disruption. Running spinners stop with
    /// [`Outcome::Disrupted`] and `reason` within one frame interval; pending
    /// spinners do the same as soon as they start. Only the first call counts.
    ///
    /// Returns false if the group had already been disrupted.
    pub fn disrupt_all(&self, reason: impl Into<String>) -> bool {
        let reason = reason.into();
        let fired = self.inner.cancel.cancel(reason.clone());
        if fired {
            log::debug!("spinner group disrupted: {reason}");
        }
        fired
    }

    /// Immediately stops every spinner that has not finished yet, pending or
    /// running, with [`Outcome::Disrupted`] and `message`.
    ///
    /// Returns how many spinners this call stopped.
    pub fn disrupt_all_not_completed(&self, message: impl Into<String>) -> usize {
        let message = message.into();
        let spinners = self.spinners();
        let stopped = spinners
            .iter()
            .filter(|s| s.stop_with_outcome(Outcome::Disrupted, message.clone()))
            .count();
        log::debug!("disrupted {stopped} unfinished spinners");
        stopped
    }

    /// Blocks until every registered spinner, including ones added while
    /// waiting, has stopped.
    pub fn wait_for_completion(&self) {
        self.wait_until(None);
    }

    /// Like [`SpinnerGroup::wait_for_completion`] but gives up after `timeout`.
    ///
    /// Returns true if every spinner stopped in time.
    pub fn wait_for_completion_timeout(&self, timeout: Duration) -> bool {
        self.wait_until(Some(Instant::now() + timeout))
    }

    fn wait_until(&self, deadline: Option<Instant>) -> bool {
        loop {
            let seen = self.inner.settled.generation();
            if self.all_stopped() {
                return true;
            }
            if !self.inner.settled.wait_past(seen, deadline) {
                return self.all_stopped();
            }
        }
    }

    fn all_stopped(&self) -> bool {
        lock(&self.inner.state)
            .spinners
            .iter()
            .all(Spinner::is_stopped)
    }

    /// Ends rendering: waits the settle delay, stops the redraw loop after one
    /// final frame and shows the cursor again. Later calls do nothing.
    pub fn stop(&self) {
        let renderer = {
            let mut state = lock(&self.inner.state);
            if state.phase == GroupPhase::Stopped {
                return;
            }
            state.phase = GroupPhase::Stopped;
            state.renderer.take()
        };

        if let Some(renderer) = renderer {
            thread::sleep(self.inner.config.settle_delay());
            renderer.stop();
            self.inner.terminal.show_cursor();
            log::debug!("spinner group stopped");
        }
    }

    /// Waits for every spinner to stop, then stops the group.
    pub fn finish(&self) {
        self.wait_for_completion();
        self.stop();
    }

    /// All spinners in render order.
    #[must_use]
    pub fn spinners(&self) -> Vec<Spinner> {
        lock(&self.inner.state).spinners.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.inner.state).spinners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn phase(&self) -> GroupPhase {
        lock(&self.inner.state).phase
    }

    #[must_use]
    pub fn disruption_reason(&self) -> Option<String> {
        self.inner.cancel.reason().map(str::to_owned)
    }
}

impl Drop for GroupInner {
    fn drop(&mut self) {
        // Last handle gone without `stop`: end the loop and restore the cursor.
        let (renderer, spinners) = {
            let mut state = lock(&self.state);
            (state.renderer.take(), std::mem::take(&mut state.spinners))
        };
        if let Some(renderer) = renderer {
            renderer.stop();
            self.terminal.show_cursor();
        }
        // Spinners outlive the group through worker handles; none keeps running.
        for spinner in spinners {
            let message = spinner.message();
            spinner.stop_with_outcome(Outcome::Disrupted, message);
        }
    }
}

impl std::fmt::Debug for SpinnerGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpinnerGroup")
            .field("spinners", &self.len())
            .field("phase", &self.phase())
            .field("disruption", &self.disruption_reason())
            .finish_non_exhaustive()
    }
}
