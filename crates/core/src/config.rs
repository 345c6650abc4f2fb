//! Game configuration and its validation.

use std::time::Duration;

use thiserror::Error;

use crate::types::{LOCK_DELAY_MS, MAX_START_LEVEL, SOFT_DROP_DELAY_MS};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("starting level {level} is outside 1..={max}")]
    LevelOutOfRange { level: u32, max: u32 },
    #[error("soft drop delay must be greater than zero")]
    ZeroSoftDropDelay,
}

/// Tunables for a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub starting_level: u32,
    /// Piece sequence seed; `None` draws one from the OS
    pub seed: Option<u64>,
    pub soft_drop_delay: Duration,
    pub lock_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_level: 1,
            seed: None,
            soft_drop_delay: Duration::from_millis(SOFT_DROP_DELAY_MS as u64),
            lock_delay: Duration::from_millis(LOCK_DELAY_MS as u64),
        }
    }
}

impl GameConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !(1..=MAX_START_LEVEL).contains(&self.starting_level) {
            return Err(ConfigError::LevelOutOfRange {
                level: self.starting_level,
                max: MAX_START_LEVEL,
            });
        }
        if self.soft_drop_delay.is_zero() {
            return Err(ConfigError::ZeroSoftDropDelay);
        }
        Ok(self)
    }

    pub fn with_starting_level(self, starting_level: u32) -> Self {
        Self {
            starting_level,
            ..self
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }
}
