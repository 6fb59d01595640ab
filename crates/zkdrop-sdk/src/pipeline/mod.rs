//! Boundary to the external witness calculator and prover.
//!
//! The circuit inputs are turned into a witness using the compiled circuit, and the witness
//! into proof call data using the proving key. Both steps are long-running and cancellable:
//! dropping the returned futures abandons the work.

mod config;
mod error;
mod retry;
mod snarkjs;

use std::fmt;
use std::path::{Path, PathBuf};

pub use config::{ConfigError, PipelineConfig, ValidatedPipelineConfig};
pub use error::PipelineError;
pub use snarkjs::{DEFAULT_SNARKJS_PROGRAM, SnarkjsPipeline};
use tracing::{info, instrument};
use zkdrop_core::base::FieldElement;
use zkdrop_core::schema::circuit_inputs::CircuitInputs;
use zkdrop_merkle::{Committer, MerkleTree, Note};

use crate::circuit_input::build_circuit_inputs;

/// Compiled artifacts of the withdrawal circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitArtifacts {
    /// Compiled circuit used for witness calculation.
    pub circuit_wasm: PathBuf,
    /// Proving key of the circuit.
    pub proving_key: PathBuf,
}

/// A calculated witness in the external toolchain's binary format.
#[derive(Clone, PartialEq, Eq)]
pub struct Witness(pub Vec<u8>);

impl fmt::Debug for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Witness(<{} bytes>)", self.0.len())
    }
}

/// Proof call data, ready for submission to the on-chain verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofCallData(pub String);

/// Turns circuit inputs into a witness.
pub trait WitnessCalculator {
    /// Calculate the witness of `inputs` for the compiled circuit at `circuit_wasm`.
    fn calculate_witness(
        &self,
        inputs: &CircuitInputs,
        circuit_wasm: &Path,
    ) -> impl Future<Output = Result<Witness, PipelineError>> + Send;
}

/// Turns a witness into proof call data.
pub trait ProofSynthesizer {
    /// Prove `witness` with the key at `proving_key`.
    fn prove(
        &self,
        witness: &Witness,
        proving_key: &Path,
    ) -> impl Future<Output = Result<ProofCallData, PipelineError>> + Send;
}

/// Run the witness and proving steps for already assembled circuit inputs.
///
/// # Errors
/// Propagates the first failing step.
#[instrument(skip_all, fields(root = %inputs.root, nullifier_hash = %inputs.nullifier_hash))]
pub async fn prove_circuit_inputs<W, P>(
    inputs: &CircuitInputs,
    artifacts: &CircuitArtifacts,
    witness_calculator: &W,
    prover: &P,
) -> Result<ProofCallData, PipelineError>
where
    W: WitnessCalculator + Sync,
    P: ProofSynthesizer + Sync,
{
    info!("Calculating witness");
    let witness = witness_calculator
        .calculate_witness(inputs, &artifacts.circuit_wasm)
        .await?;

    info!("Generating proof");
    let call_data = prover.prove(&witness, &artifacts.proving_key).await?;
    info!("Proof generated");
    Ok(call_data)
}

/// Build the circuit inputs for `note` and produce its proof call data.
///
/// # Errors
/// Returns [`PipelineError::Claim`] if the note is not in `tree`, or the first failing
/// pipeline step.
pub async fn generate_proof_call_data<C, W, P>(
    tree: &MerkleTree,
    committer: &C,
    note: &Note,
    recipient: FieldElement,
    artifacts: &CircuitArtifacts,
    witness_calculator: &W,
    prover: &P,
) -> Result<ProofCallData, PipelineError>
where
    C: Committer,
    W: WitnessCalculator + Sync,
    P: ProofSynthesizer + Sync,
{
    let inputs = build_circuit_inputs(tree, committer, note, recipient)?;
    prove_circuit_inputs(&inputs, artifacts, witness_calculator, prover).await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use test_utils::SumHasher;
    use zkdrop_core::base::SecretValue;

    use super::*;
    use crate::circuit_input::ClaimError;

    /// Encodes the inputs as the witness and records the circuit path.
    #[derive(Default)]
    struct JsonWitness(Mutex<Vec<PathBuf>>);

    impl WitnessCalculator for JsonWitness {
        async fn calculate_witness(
            &self,
            inputs: &CircuitInputs,
            circuit_wasm: &Path,
        ) -> Result<Witness, PipelineError> {
            self.0
                .lock()
                .expect("lock")
                .push(circuit_wasm.to_path_buf());
            Ok(Witness(serde_json::to_vec(inputs)?))
        }
    }

    /// Echoes the witness length and key file name as call data.
    struct EchoProver;

    impl ProofSynthesizer for EchoProver {
        async fn prove(
            &self,
            witness: &Witness,
            proving_key: &Path,
        ) -> Result<ProofCallData, PipelineError> {
            Ok(ProofCallData(format!(
                "{}:{}",
                proving_key.display(),
                witness.0.len()
            )))
        }
    }

    struct FailingProver;

    impl ProofSynthesizer for FailingProver {
        async fn prove(&self, _: &Witness, _: &Path) -> Result<ProofCallData, PipelineError> {
            Err(PipelineError::Proof("constraint not satisfied".to_owned()))
        }
    }

    /// Commits to the first preimage byte.
    struct FirstByteCommitter;

    impl Committer for FirstByteCommitter {
        fn commit(&self, bytes: &[u8]) -> FieldElement {
            FieldElement::from(u64::from(bytes.first().copied().unwrap_or_default()))
        }
    }

    fn artifacts() -> CircuitArtifacts {
        CircuitArtifacts {
            circuit_wasm: PathBuf::from("withdraw.wasm"),
            proving_key: PathBuf::from("withdraw.zkey"),
        }
    }

    fn fixture() -> (MerkleTree, Note) {
        let leaves: Vec<_> = [1_u64, 2, 3, 4].into_iter().map(FieldElement::from).collect();
        let tree = MerkleTree::from_leaves(&leaves, &SumHasher).expect("valid tree");
        let nullifier = SecretValue::try_from(FieldElement::from(2)).expect("fits");
        let secret = SecretValue::try_from(FieldElement::from(8)).expect("fits");
        (tree, Note::new(nullifier, secret))
    }

    #[tokio::test]
    async fn runs_both_steps_in_order() {
        let (tree, note) = fixture();
        let witness = JsonWitness::default();
        let expected_inputs = build_circuit_inputs(&tree, &FirstByteCommitter, &note, FieldElement::ONE)
            .expect("note is in the tree");
        let expected_len = serde_json::to_vec(&expected_inputs).expect("encode").len();

        let call_data = generate_proof_call_data(
            &tree,
            &FirstByteCommitter,
            &note,
            FieldElement::ONE,
            &artifacts(),
            &witness,
            &EchoProver,
        )
        .await
        .expect("pipeline succeeds");

        assert_eq!(call_data, ProofCallData(format!("withdraw.zkey:{expected_len}")));
        assert_eq!(
            *witness.0.lock().expect("lock"),
            vec![PathBuf::from("withdraw.wasm")]
        );
    }

    #[tokio::test]
    async fn missing_note_fails_before_witness_calculation() {
        let (tree, _) = fixture();
        let stranger = Note::new(
            SecretValue::try_from(FieldElement::from(9)).expect("fits"),
            SecretValue::try_from(FieldElement::from(9)).expect("fits"),
        );
        let witness = JsonWitness::default();

        let result = generate_proof_call_data(
            &tree,
            &FirstByteCommitter,
            &stranger,
            FieldElement::ONE,
            &artifacts(),
            &witness,
            &EchoProver,
        )
        .await;

        assert!(matches!(
            result,
            Err(PipelineError::Claim(ClaimError::Tree(_)))
        ));
        assert!(witness.0.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn prover_errors_propagate() {
        let (tree, note) = fixture();
        let inputs = build_circuit_inputs(&tree, &FirstByteCommitter, &note, FieldElement::ONE)
            .expect("note is in the tree");

        let result =
            prove_circuit_inputs(&inputs, &artifacts(), &JsonWitness::default(), &FailingProver)
                .await;
        assert!(matches!(result, Err(PipelineError::Proof(_))));
    }
}
