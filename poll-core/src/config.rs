// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Configuration for the poll detail component.

use std::time::Duration;

use crate::chart::ColorScheme;
use crate::error::{PollDetailError, Result};

/// How per-option vote counts are read from the contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchMode {
    /// One read at a time, in option order
    #[default]
    Sequential,
    /// All reads issued together; results are still ordered by option index
    Concurrent,
}

/// Configuration for the poll detail component.
#[derive(Clone, Debug)]
pub struct PollDetailConfig {
    /// Interval between receipt queries while awaiting confirmation
    pub confirmation_interval_ms: u64,
    /// Delay before a success or error banner is dismissed
    pub dismiss_after_ms: u64,
    /// Vote count read strategy
    pub fetch_mode: FetchMode,
    /// Chart slice colouring
    pub color_scheme: ColorScheme,
}

impl Default for PollDetailConfig {
    fn default() -> Self {
        Self {
            confirmation_interval_ms: 1000, // 1 second
            dismiss_after_ms: 5000,         // 5 seconds
            fetch_mode: FetchMode::Sequential,
            color_scheme: ColorScheme::Random,
        }
    }
}

impl PollDetailConfig {
    /// Create a new configuration.
    pub fn new(
        confirmation_interval_ms: u64,
        dismiss_after_ms: u64,
        fetch_mode: FetchMode,
        color_scheme: ColorScheme,
    ) -> Self {
        Self {
            confirmation_interval_ms,
            dismiss_after_ms,
            fetch_mode,
            color_scheme,
        }
    }

    /// Get the confirmation poll interval as a Duration.
    pub fn confirmation_interval(&self) -> Duration {
        Duration::from_millis(self.confirmation_interval_ms)
    }

    /// Get the banner dismissal delay as a Duration.
    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.confirmation_interval_ms == 0 {
            return Err(PollDetailError::InvalidConfig(
                "confirmation_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.dismiss_after_ms == 0 {
            return Err(PollDetailError::InvalidConfig(
                "dismiss_after_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = PollDetailConfig::default();
        assert_eq!(config.confirmation_interval(), Duration::from_secs(1));
        assert_eq!(config.dismiss_after(), Duration::from_secs(5));
        assert_eq!(config.fetch_mode, FetchMode::Sequential);
        assert_eq!(config.color_scheme, ColorScheme::Random);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_new() {
        let config = PollDetailConfig::new(250, 750, FetchMode::Concurrent, ColorScheme::Palette);
        assert_eq!(config.confirmation_interval_ms, 250);
        assert_eq!(config.dismiss_after_ms, 750);
        assert_eq!(config.fetch_mode, FetchMode::Concurrent);
        assert_eq!(config.color_scheme, ColorScheme::Palette);
    }

    #[test]
    fn test_config_validate_zero_interval() {
        let mut config = PollDetailConfig::default();
        config.confirmation_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_zero_dismiss() {
        let mut config = PollDetailConfig::default();
        config.dismiss_after_ms = 0;
        assert!(config.validate().is_err());
    }
}
