// src/terminal.rs
//! Terminal control primitives used by the spinner renderer.
//!
//! The renderer only talks to a [`Terminal`]; [`AnsiTerminal`] writes the real
//! escape sequences to stdout and [`Recorder`] captures calls for tests.

use crossterm::{
    cursor, execute, queue,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Side-effecting terminal operations. Failures are ignored: terminal output
/// is fire-and-forget.
pub trait Terminal: Send + Sync {
    fn hide_cursor(&self);
    fn show_cursor(&self);
    fn move_up(&self, lines: usize);
    fn move_down(&self, lines: usize);
    fn clear_line(&self);
    fn write_line(&self, line: &str);
    fn flush(&self);
}

/// Writes ANSI sequences to stdout through crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnsiTerminal;

impl AnsiTerminal {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn clamp_lines(lines: usize) -> u16 {
    u16::try_from(lines).unwrap_or(u16::MAX)
}

impl Terminal for AnsiTerminal {
    fn hide_cursor(&self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Hide);
    }

    fn show_cursor(&self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
    }

    fn move_up(&self, lines: usize) {
        // crossterm emits `CSI 0 A`, which most terminals treat as one line.
        if lines == 0 {
            return;
        }
        let mut stdout = io::stdout();
        let _ = queue!(stdout, cursor::MoveUp(clamp_lines(lines)));
    }

    fn move_down(&self, lines: usize) {
        if lines == 0 {
            return;
        }
        let mut stdout = io::stdout();
        let _ = queue!(stdout, cursor::MoveDown(clamp_lines(lines)));
    }

    fn clear_line(&self) {
        let mut stdout = io::stdout();
        let _ = queue!(stdout, Clear(ClearType::CurrentLine));
    }

    fn write_line(&self, line: &str) {
        let mut stdout = io::stdout();
        let _ = writeln!(stdout, "{line}");
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

/// A single recorded terminal call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermOp {
    HideCursor,
    ShowCursor,
    MoveUp(usize),
    MoveDown(usize),
    ClearLine,
    Line(String),
    Flush,
}

/// Test double that records every call instead of touching a terminal.
#[derive(Debug, Default)]
pub struct Recorder {
    ops: Mutex<Vec<TermOp>>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, op: TermOp) {
        self.ops
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(op);
    }

    /// Everything recorded so far, in call order.
    #[must_use]
    pub fn ops(&self) -> Vec<TermOp> {
        self.ops
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&TermOp) -> bool) -> usize {
        self.ops
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|&op| pred(op))
            .count()
    }

    /// Lines written by the most recent complete redraw of `height` lines.
    #[must_use]
    pub fn last_frame(&self, height: usize) -> Vec<String> {
        let lines: Vec<String> = self
            .ops()
            .into_iter()
            .filter_map(|op| match op {
                TermOp::Line(l) => Some(l),
                _ => None,
            })
            .collect();
        let start = lines.len().saturating_sub(height);
        lines[start..].to_vec()
    }
}

impl Terminal for Recorder {
    fn hide_cursor(&self) {
        self.push(TermOp::HideCursor);
    }

    fn show_cursor(&self) {
        self.push(TermOp::ShowCursor);
    }

    fn move_up(&self, lines: usize) {
        self.push(TermOp::MoveUp(lines));
    }

    fn move_down(&self, lines: usize) {
        self.push(TermOp::MoveDown(lines));
    }

    fn clear_line(&self) {
        self.push(TermOp::ClearLine);
    }

    fn write_line(&self, line: &str) {
        self.push(TermOp::Line(line.to_string()));
    }

    fn flush(&self) {
        self.push(TermOp::Flush);
    }
}
