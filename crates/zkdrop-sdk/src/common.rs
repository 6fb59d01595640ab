//! CLI-independent configuration types.

use std::path::PathBuf;

use crate::pipeline::{CircuitArtifacts, PipelineConfig};

/// Everything `claim prove` needs to run the external prover.
#[derive(Debug, Clone)]
pub struct ProverConfig {
    /// Path or name of the `snarkjs` executable.
    pub snarkjs_program: PathBuf,
    /// Compiled circuit and proving key.
    pub artifacts: CircuitArtifacts,
    /// Retry behaviour for terminated prover processes.
    pub pipeline: PipelineConfig,
}
