// src/spinner/render.rs
//! Redraw logic for the spinner block.

use super::signal::Latch;
use crate::terminal::Terminal;
use std::sync::Arc;
use std::time::Duration;

/// Repaints a block of status lines in place.
pub struct Renderer {
    terminal: Arc<dyn Terminal>,
    drawn: Option<usize>,
}

impl Renderer {
    #[must_use]
    pub fn new(terminal: Arc<dyn Terminal>) -> Self {
        Self {
            terminal,
            drawn: None,
        }
    }

    /// Writes one line per entry. The first draw starts at the cursor; later
    /// draws first move back over the previously drawn block. Blank entries
    /// become empty placeholder lines so the block height never drifts.
    pub fn draw(&mut self, lines: &[String]) {
        if let Some(previous) = self.drawn {
            self.terminal.move_up(previous);
        }
        for line in lines {
            self.terminal.clear_line();
            self.terminal.write_line(line);
        }
        self.terminal.flush();
        self.drawn = Some(lines.len());
    }

    /// Number of lines written by the last draw, if any.
    #[must_use]
    pub fn drawn(&self) -> Option<usize> {
        self.drawn
    }
}

/// Redraws every `tick` until `quit` fires, then draws one final frame so the
/// last transitions are on screen.
pub(crate) fn run_render_loop<F>(
    renderer: &mut Renderer,
    quit: &Latch,
    tick: Duration,
    snapshot: F,
) where
    F: Fn() -> Vec<String>,
{
    loop {
        renderer.draw(&snapshot());
        if quit.wait_timeout(tick) {
            break;
        }
    }
    renderer.draw(&snapshot());
}
