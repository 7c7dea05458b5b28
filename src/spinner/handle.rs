// src/spinner/handle.rs
//! Thread management for the redraw loop.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::render::{self, Renderer};
use super::signal::Latch;

/// Handle for controlling the renderer thread.
pub struct RenderHandle {
    handle: thread::JoinHandle<()>,
    quit: Arc<Latch>,
}

impl RenderHandle {
    #[must_use]
    pub fn spawn<F>(mut renderer: Renderer, tick: Duration, snapshot: F) -> Self
    where
        F: Fn() -> Vec<String> + Send + 'static,
    {
        let quit = Arc::new(Latch::new());
        let q_clone = Arc::clone(&quit);

        let handle = thread::spawn(move || {
            render::run_render_loop(&mut renderer, &q_clone, tick, snapshot);
        });

        Self { handle, quit }
    }

    /// Signals the loop to quit and waits for its final redraw.
    pub fn stop(self) {
        self.quit.fire();
        if self.handle.join().is_err() {
            log::warn!("spinner renderer thread panicked");
        }
    }
}
