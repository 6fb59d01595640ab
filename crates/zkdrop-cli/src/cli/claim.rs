//! Claim subcommands.

use std::path::PathBuf;
use std::time::Duration;

use zkdrop_core::base::FieldElement;
use zkdrop_sdk::common::ProverConfig;
use zkdrop_sdk::pipeline::{CircuitArtifacts, DEFAULT_SNARKJS_PROGRAM, PipelineConfig};

use super::constants::{
    DEFAULT_CALL_DATA_FILE, DEFAULT_CIRCUIT_WASM, DEFAULT_INPUTS_FILE, DEFAULT_MAX_RETRIES,
    DEFAULT_NOTE_FILE, DEFAULT_PROVING_KEY, DEFAULT_RETRY_DELAY_MS, DEFAULT_TREE_FILE,
    ZKDROP_CALL_DATA_OUT, ZKDROP_CIRCUIT_WASM, ZKDROP_CONFIG_FILE, ZKDROP_INPUTS_IN,
    ZKDROP_INPUTS_OUT, ZKDROP_MAX_RETRIES, ZKDROP_NOTE_FILE, ZKDROP_PROVING_KEY,
    ZKDROP_RECIPIENT, ZKDROP_RETRY_DELAY_MS, ZKDROP_SNARKJS, ZKDROP_TREE_FILE,
};
use super::parse_field_element;

/// Arguments for claim preparation.
#[derive(Debug, clap::Args)]
pub struct ClaimPrepareArgs {
    /// Note file written by `note new`.
    #[arg(long, env = ZKDROP_NOTE_FILE, default_value = DEFAULT_NOTE_FILE)]
    pub note: PathBuf,
    /// Tree storage file.
    #[arg(long, env = ZKDROP_TREE_FILE, default_value = DEFAULT_TREE_FILE)]
    pub tree: PathBuf,
    /// Recipient address (`0x` hex) or decimal value bound into the proof.
    #[arg(long, env = ZKDROP_RECIPIENT, value_parser = parse_field_element)]
    pub recipient: FieldElement,
    /// Airdrop configuration to check the tree against.
    #[arg(long, env = ZKDROP_CONFIG_FILE)]
    pub config: Option<PathBuf>,
    /// Output file for the circuit inputs (contains the note secrets).
    #[arg(long, env = ZKDROP_INPUTS_OUT, default_value = DEFAULT_INPUTS_FILE)]
    pub inputs_out: PathBuf,
}

/// Arguments for proof generation.
#[derive(Debug, clap::Args)]
pub struct ClaimProveArgs {
    /// Circuit inputs written by `claim prepare`.
    #[arg(long, env = ZKDROP_INPUTS_IN, default_value = DEFAULT_INPUTS_FILE)]
    pub inputs: PathBuf,
    /// Compiled withdrawal circuit.
    #[arg(long, env = ZKDROP_CIRCUIT_WASM, default_value = DEFAULT_CIRCUIT_WASM)]
    pub circuit_wasm: PathBuf,
    /// PLONK proving key of the circuit.
    #[arg(long, env = ZKDROP_PROVING_KEY, default_value = DEFAULT_PROVING_KEY)]
    pub proving_key: PathBuf,
    /// `snarkjs` executable.
    #[arg(long, env = ZKDROP_SNARKJS, default_value = DEFAULT_SNARKJS_PROGRAM)]
    pub snarkjs: PathBuf,
    /// Retries when the prover process is killed.
    #[arg(long, env = ZKDROP_MAX_RETRIES, default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds.
    #[arg(long, env = ZKDROP_RETRY_DELAY_MS, default_value_t = DEFAULT_RETRY_DELAY_MS)]
    pub retry_delay_ms: u64,
    /// Output file for the proof call data.
    #[arg(long, env = ZKDROP_CALL_DATA_OUT, default_value = DEFAULT_CALL_DATA_FILE)]
    pub out: PathBuf,
}

impl From<&ClaimProveArgs> for ProverConfig {
    fn from(args: &ClaimProveArgs) -> Self {
        let initial_retry_delay = Duration::from_millis(args.retry_delay_ms);
        let defaults = PipelineConfig::default();
        Self {
            snarkjs_program: args.snarkjs.clone(),
            artifacts: CircuitArtifacts {
                circuit_wasm: args.circuit_wasm.clone(),
                proving_key: args.proving_key.clone(),
            },
            pipeline: PipelineConfig {
                max_retry_attempts: args.max_retries,
                initial_retry_delay,
                max_retry_delay: defaults.max_retry_delay.max(initial_retry_delay),
                ..defaults
            },
        }
    }
}

/// Claim command group.
#[derive(Debug, clap::Subcommand)]
pub enum ClaimCommands {
    /// Assemble the circuit inputs for a note.
    Prepare {
        #[command(flatten)]
        args: ClaimPrepareArgs,
    },
    /// Generate the proof call data with `snarkjs`.
    Prove {
        #[command(flatten)]
        args: ClaimProveArgs,
    },
}
