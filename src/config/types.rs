use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing and glyph settings shared by a spinner group and its spinners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Delay between animation frames of a running spinner.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    /// Delay between two redraws of the spinner block.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Grace period `stop` waits before ending the redraw loop.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default = "default_frames")]
    pub frames: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
            tick_interval_ms: default_tick_interval_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            frames: default_frames(),
        }
    }
}

impl Config {
    /// Never shorter than 1 ms, so a zero value cannot turn the animation
    /// into a busy loop.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    /// Never shorter than 1 ms.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

const fn default_frame_interval_ms() -> u64 {
    200
}

const fn default_tick_interval_ms() -> u64 {
    100
}

const fn default_settle_delay_ms() -> u64 {
    300
}

fn default_frames() -> Vec<String> {
    vec!["◐".into(), "◓".into(), "◑".into(), "◒".into()]
}
