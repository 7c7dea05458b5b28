// src/spinner/mod.rs
//! Grouped, in-place terminal spinners.
//!
//! A [`SpinnerGroup`] owns an ordered block of [`Spinner`]s. Each spinner
//! animates on its own thread and only mutates its own status line; a single
//! renderer thread repaints the whole block, so terminal writes never
//! interleave.

pub mod client;
pub mod controller;
pub mod handle;
pub mod render;
pub mod safe_state;
pub mod signal;
pub mod state;
pub mod style;

pub use client::Spinner;
pub use controller::{GroupPhase, SpinnerGroup};
pub use render::Renderer;
pub use state::{Completion, Outcome, Phase};
