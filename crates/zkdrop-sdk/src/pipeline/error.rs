use zkdrop_core::base::FieldElement;

use super::config::ConfigError;
use crate::circuit_input::ClaimError;

/// Errors that can occur while generating a proof.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Filesystem or process spawning error.
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
    /// Witness calculation failed.
    #[error("Witness calculation failed: {0}")]
    Witness(String),
    /// Proof synthesis failed.
    #[error("Proof synthesis failed: {0}")]
    Proof(String),
    /// Call data export failed or produced unusable output.
    #[error("Call data export failed: {0}")]
    CallData(String),
    /// Circuit inputs could not be encoded.
    #[error("Serialization: {0}")]
    Serialization(#[from] serde_json::Error),
    /// An external process was killed by a signal.
    #[error("{step} process was terminated by a signal")]
    Terminated {
        /// The pipeline step whose process was terminated.
        step: &'static str,
    },
    /// A circuit input does not fit the prover backend's scalar field.
    #[error("Circuit input {input} = {value} is not below the prover's scalar field modulus")]
    FieldOutOfRange {
        /// Name of the offending circuit input.
        input: &'static str,
        /// The offending value.
        value: FieldElement,
    },
    /// Invalid pipeline configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// The claim could not be assembled.
    #[error("Claim: {0}")]
    Claim(#[from] ClaimError),
}

impl PipelineError {
    /// Returns `true` if this error is transient and the step should be retried.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Terminated { .. })
    }
}
