//! Retry configuration for the proof pipeline.

use std::time::Duration;

use thiserror::Error;

/// Default number of retries after a terminated external process.
const MAX_RETRIES: u32 = 2;
/// Initial retry delay in milliseconds.
const INITIAL_RETRY_DELAY_MS: u64 = 500;
/// Maximum retry delay in milliseconds.
const MAX_RETRY_DELAY_MS: u64 = 5000;
/// Factor for exponential backoff.
const BACKOFF_FACTOR: u32 = 2;
/// Upper bound on configurable retries.
const RETRY_LIMIT: u32 = 10;

/// Errors produced when validating a [`PipelineConfig`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Too many retries requested.
    #[error("max_retry_attempts {0} exceeds the limit of {RETRY_LIMIT}")]
    TooManyRetries(u32),
    /// The backoff factor must be at least 1.
    #[error("backoff_factor must be at least 1")]
    ZeroBackoffFactor,
    /// The initial delay exceeds the maximum delay.
    #[error("initial_retry_delay {initial:?} exceeds max_retry_delay {max:?}")]
    InvalidDelayRange {
        /// Configured initial delay.
        initial: Duration,
        /// Configured maximum delay.
        max: Duration,
    },
}

/// Retry behaviour for external pipeline steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Retries after the first attempt.
    pub max_retry_attempts: u32,
    /// Delay before the first retry.
    pub initial_retry_delay: Duration,
    /// Upper bound on any single delay.
    pub max_retry_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_retry_attempts: MAX_RETRIES,
            initial_retry_delay: Duration::from_millis(INITIAL_RETRY_DELAY_MS),
            max_retry_delay: Duration::from_millis(MAX_RETRY_DELAY_MS),
            backoff_factor: BACKOFF_FACTOR,
        }
    }
}

impl PipelineConfig {
    /// Check the configuration for consistency.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] describing the first invalid setting.
    pub const fn validate(self) -> Result<ValidatedPipelineConfig, ConfigError> {
        if self.max_retry_attempts > RETRY_LIMIT {
            return Err(ConfigError::TooManyRetries(self.max_retry_attempts));
        }
        if self.backoff_factor == 0 {
            return Err(ConfigError::ZeroBackoffFactor);
        }
        if self.initial_retry_delay.as_nanos() > self.max_retry_delay.as_nanos() {
            return Err(ConfigError::InvalidDelayRange {
                initial: self.initial_retry_delay,
                max: self.max_retry_delay,
            });
        }
        Ok(ValidatedPipelineConfig {
            max_retry_attempts: self.max_retry_attempts,
            initial_retry_delay: self.initial_retry_delay,
            max_retry_delay: self.max_retry_delay,
            backoff_factor: self.backoff_factor,
        })
    }
}

/// A [`PipelineConfig`] that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPipelineConfig {
    pub(crate) max_retry_attempts: u32,
    pub(crate) initial_retry_delay: Duration,
    pub(crate) max_retry_delay: Duration,
    pub(crate) backoff_factor: u32,
}
