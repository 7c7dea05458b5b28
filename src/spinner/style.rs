// src/spinner/style.rs
//! Glyphs and colours for spinner status lines.

use super::state::Outcome;
use colored::Colorize;

/// Status line of a running spinner: `<frame> <message>`.
#[must_use]
pub fn running(frame: &str, message: &str) -> String {
    format!("{} {}", frame.blue(), single_line(message))
}

/// Status line of a stopped spinner: `<symbol> <message>`.
#[must_use]
pub fn finished(outcome: &Outcome, message: &str) -> String {
    let message = single_line(message);
    match outcome {
        Outcome::Done => format!("{} {}", "✔".dimmed(), message.dimmed()),
        Outcome::Success => format!("{} {message}", "✔".green()),
        Outcome::Failure => format!("{} {message}", "✘".red()),
        Outcome::Disrupted => format!("{} {message}", "!".yellow()),
        Outcome::Custom(_) => format!("{} {message}", "?".dimmed()),
    }
}

/// The bare symbol for an outcome, without colour.
#[must_use]
pub fn symbol(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Done | Outcome::Success => "✔",
        Outcome::Failure => "✘",
        Outcome::Disrupted => "!",
        Outcome::Custom(_) => "?",
    }
}

/// A status line must occupy exactly one terminal row.
fn single_line(message: &str) -> String {
    message.replace(['\r', '\n'], " ")
}
