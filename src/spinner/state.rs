// src/spinner/state.rs
//! Spinner state machine.

use super::style;
use std::fmt;
use std::str::FromStr;

/// How a spinner ended.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Plain completion via `stop`.
    Done,
    Success,
    Failure,
    /// Stopped by a group disruption.
    Disrupted,
    /// Any tag not recognised above; rendered with a neutral symbol.
    Custom(String),
}

impl Outcome {
    /// Maps an outcome tag (`success`, `failure`, `disruption`, `done`) to an
    /// outcome. Unknown tags become [`Outcome::Custom`].
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "success" => Self::Success,
            "failure" => Self::Failure,
            "disruption" => Self::Disrupted,
            "done" => Self::Done,
            _ => Self::Custom(tag.to_string()),
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Done => "done",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Disrupted => "disruption",
            Self::Custom(label) => label,
        }
    }
}

impl FromStr for Outcome {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Outcome {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Final outcome and message of a stopped spinner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub outcome: Outcome,
    pub message: String,
}

/// Lifecycle phase. Only `Stopped` carries an outcome, and it is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Running,
    Stopped(Completion),
}

impl Phase {
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped(_))
    }
}

pub struct SpinnerState {
    message: String,
    phase: Phase,
    status: String,
    frame: usize,
}

impl SpinnerState {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            phase: Phase::Pending,
            status: String::new(),
            frame: 0,
        }
    }

    /// Pending -> Running. Returns false if the spinner was not pending.
    pub fn begin(&mut self, frames: &[String]) -> bool {
        if self.phase != Phase::Pending {
            return false;
        }
        self.phase = Phase::Running;
        self.frame = 0;
        self.render_frame(frames);
        true
    }

    /// Moves to the next frame. Returns false once the spinner is no longer running.
    pub fn advance(&mut self, frames: &[String]) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.frame = self.frame.wrapping_add(1);
        self.render_frame(frames);
        true
    }

    /// Terminal transition. Returns false if the spinner had already stopped,
    /// in which case nothing changes.
    pub fn finish(&mut self, outcome: Outcome, message: impl Into<String>) -> bool {
        if self.phase.is_stopped() {
            return false;
        }
        let message = message.into();
        self.status = style::finished(&outcome, &message);
        self.phase = Phase::Stopped(Completion { outcome, message });
        true
    }

    pub fn set_message(&mut self, message: String, frames: &[String]) {
        self.message = message;
        if self.phase == Phase::Running {
            self.render_frame(frames);
        }
    }

    fn render_frame(&mut self, frames: &[String]) {
        let glyph = frames
            .get(self.frame % frames.len().max(1))
            .map_or("", String::as_str);
        self.status = style::running(glyph, &self.message);
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}
