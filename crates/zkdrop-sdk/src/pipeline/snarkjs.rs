//! Pipeline adapter driving the `snarkjs` command line tool.
//!
//! `snarkjs` PLONK circuits are compiled over the bn128 scalar field, which is smaller than the
//! Pallas base field the tree is built in. The circom witness calculator silently reduces
//! larger inputs, so every circuit input must be below the bn128 scalar modulus; records with
//! a larger value are rejected before any process is started.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};

use tokio::process::Command;
use tracing::debug;
use zkdrop_core::base::FIELD_ELEMENT_SIZE;
use zkdrop_core::schema::circuit_inputs::CircuitInputs;

use super::config::ValidatedPipelineConfig;
use super::error::PipelineError;
use super::retry::retry_with_backoff;
use super::{ProofCallData, ProofSynthesizer, Witness, WitnessCalculator};

/// Program name looked up on `PATH` when no explicit path is configured.
pub const DEFAULT_SNARKJS_PROGRAM: &str = "snarkjs";

/// Scalar field modulus of bn128, big-endian.
const BN128_SCALAR_MODULUS: [u8; FIELD_ELEMENT_SIZE] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

const INPUT_FILE: &str = "input.json";
const WITNESS_FILE: &str = "witness.wtns";
const PROOF_FILE: &str = "proof.json";
const PUBLIC_FILE: &str = "public.json";

#[derive(Debug, Clone, Copy)]
enum Step {
    Witness,
    Proof,
    CallData,
}

impl Step {
    const fn name(self) -> &'static str {
        match self {
            Self::Witness => "witness",
            Self::Proof => "proof",
            Self::CallData => "call data",
        }
    }

    fn failed(self, detail: String) -> PipelineError {
        match self {
            Self::Witness => PipelineError::Witness(detail),
            Self::Proof => PipelineError::Proof(detail),
            Self::CallData => PipelineError::CallData(detail),
        }
    }
}

/// PLONK pipeline backed by `snarkjs`.
///
/// Every step runs in its own temporary directory. Child processes are killed when the
/// future driving them is dropped.
#[derive(Debug, Clone)]
pub struct SnarkjsPipeline {
    program: PathBuf,
    config: ValidatedPipelineConfig,
}

impl SnarkjsPipeline {
    /// Create a pipeline invoking `program`.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, config: ValidatedPipelineConfig) -> Self {
        Self {
            program: program.into(),
            config,
        }
    }

    async fn run(&self, step: Step, args: &[&OsStr]) -> Result<Vec<u8>, PipelineError> {
        debug!(step = step.name(), program = %self.program.display(), "Running snarkjs");
        retry_with_backoff(&self.config, || async move {
            let output = Command::new(&self.program)
                .args(args)
                .stdin(Stdio::null())
                .kill_on_drop(true)
                .output()
                .await?;
            check_output(step, &output)?;
            Ok(output.stdout)
        })
        .await
    }
}

fn check_output(step: Step, output: &Output) -> Result<(), PipelineError> {
    if output.status.success() {
        return Ok(());
    }
    let Some(code) = output.status.code() else {
        return Err(PipelineError::Terminated { step: step.name() });
    };
    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(step.failed(format!("exit code {code}: {}", stderr.trim())))
}

/// Check that every circuit input is a canonical bn128 scalar.
fn ensure_backend_field(inputs: &CircuitInputs) -> Result<(), PipelineError> {
    let scalars = [
        ("root", inputs.root),
        ("nullifierHash", inputs.nullifier_hash),
        ("nullifier", inputs.nullifier),
        ("secret", inputs.secret),
        ("recipient", inputs.recipient),
    ]
    .into_iter()
    .chain(inputs.path_elements.iter().map(|element| ("pathElements", *element)));

    for (input, value) in scalars {
        if value.to_be_bytes() >= BN128_SCALAR_MODULUS {
            return Err(PipelineError::FieldOutOfRange { input, value });
        }
    }
    Ok(())
}

/// Keep only the proof component of the exported call data.
fn proof_call_data(stdout: &[u8]) -> Result<ProofCallData, PipelineError> {
    let text = std::str::from_utf8(stdout).map_err(|e| PipelineError::CallData(e.to_string()))?;
    text.trim()
        .split(',')
        .next()
        .map(str::trim)
        .filter(|proof| !proof.is_empty())
        .map(|proof| ProofCallData(proof.to_owned()))
        .ok_or_else(|| PipelineError::CallData("empty call data output".to_owned()))
}

impl WitnessCalculator for SnarkjsPipeline {
    async fn calculate_witness(
        &self,
        inputs: &CircuitInputs,
        circuit_wasm: &Path,
    ) -> Result<Witness, PipelineError> {
        ensure_backend_field(inputs)?;
        let work_dir = tempfile::tempdir()?;
        let input_path = work_dir.path().join(INPUT_FILE);
        let witness_path = work_dir.path().join(WITNESS_FILE);
        tokio::fs::write(&input_path, serde_json::to_vec(inputs)?).await?;

        self.run(
            Step::Witness,
            &[
                OsStr::new("wtns"),
                OsStr::new("calculate"),
                circuit_wasm.as_os_str(),
                input_path.as_os_str(),
                witness_path.as_os_str(),
            ],
        )
        .await?;

        Ok(Witness(tokio::fs::read(&witness_path).await?))
    }
}

impl ProofSynthesizer for SnarkjsPipeline {
    async fn prove(
        &self,
        witness: &Witness,
        proving_key: &Path,
    ) -> Result<ProofCallData, PipelineError> {
        let work_dir = tempfile::tempdir()?;
        let witness_path = work_dir.path().join(WITNESS_FILE);
        let proof_path = work_dir.path().join(PROOF_FILE);
        let public_path = work_dir.path().join(PUBLIC_FILE);
        tokio::fs::write(&witness_path, &witness.0).await?;

        self.run(
            Step::Proof,
            &[
                OsStr::new("plonk"),
                OsStr::new("prove"),
                proving_key.as_os_str(),
                witness_path.as_os_str(),
                proof_path.as_os_str(),
                public_path.as_os_str(),
            ],
        )
        .await?;

        let stdout = self
            .run(
                Step::CallData,
                &[
                    OsStr::new("zkey"),
                    OsStr::new("export"),
                    OsStr::new("soliditycalldata"),
                    public_path.as_os_str(),
                    proof_path.as_os_str(),
                ],
            )
            .await?;
        proof_call_data(&stdout)
    }
}
