// src/config/mod.rs
pub mod types;

pub use self::types::Config;

use crate::error::{Result, SpinnerError};
use std::fs;
use std::path::Path;

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TOML document. Missing keys fall back to their defaults.
    ///
    /// # Errors
    /// Returns error if the TOML is malformed or the values fail validation.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML config file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or its content is invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SpinnerError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        log::debug!("loaded spinner config from {}", path.display());
        Self::parse_toml(&content)
    }

    /// Validates configuration.
    ///
    /// # Errors
    /// Returns error if there are no frames or an animation interval is zero.
    pub fn validate(&self) -> Result<()> {
        if self.frames.is_empty() {
            return Err(SpinnerError::InvalidConfig(
                "frames must contain at least one glyph".into(),
            ));
        }
        if self.frame_interval_ms == 0 {
            return Err(SpinnerError::InvalidConfig(
                "frame_interval_ms must be greater than zero".into(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(SpinnerError::InvalidConfig(
                "tick_interval_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
