pub mod config;
pub mod error;
pub mod spinner;
pub mod terminal;

pub use config::Config;
pub use error::{Result, SpinnerError};
pub use spinner::{Completion, GroupPhase, Outcome, Phase, Spinner, SpinnerGroup};
pub use terminal::{AnsiTerminal, Recorder, TermOp, Terminal};
