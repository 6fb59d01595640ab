use std::path::PathBuf;

use eyre::{Context as _, ensure};
use tracing::{info, instrument};
use zeroize::Zeroizing;
use zkdrop_core::base::FieldElement;
use zkdrop_core::schema::circuit_inputs::CircuitInputs;
use zkdrop_core::schema::config::AirdropConfiguration;
use zkdrop_core::schema::note::NoteFile;
use zkdrop_core::schema::proof::ProofOutput;
use zkdrop_merkle::{Note, SinsemillaCommitter, init_hash_primitives};

use super::files::{ensure_matches_configuration, load_tree, read_json, write_json};
use super::sensitive_output::write_sensitive_output;
use crate::circuit_input::build_circuit_inputs;
use crate::common::ProverConfig;
use crate::pipeline::{SnarkjsPipeline, prove_circuit_inputs};

/// Assemble the circuit inputs for claiming a note to `recipient`.
///
/// The output holds the note secrets and is written with owner-only permissions.
///
/// # Errors
/// Returns an error if the note or tree cannot be loaded, the tree does not match the
/// configuration, or the note is not in the tree.
#[instrument(skip_all, fields(tree = %tree_file.display(), %recipient))]
pub async fn claim_prepare(
    note_file: PathBuf,
    tree_file: PathBuf,
    recipient: FieldElement,
    config_file: Option<PathBuf>,
    output: PathBuf,
) -> eyre::Result<()> {
    let stored: NoteFile = read_json(&note_file, "note").await?;
    let tree = load_tree(&tree_file).await?;

    if let Some(config_file) = config_file {
        let config: AirdropConfiguration = read_json(&config_file, "configuration").await?;
        ensure_matches_configuration(&tree, &config)?;
    }

    let inputs = tokio::task::spawn_blocking(move || {
        init_hash_primitives();
        let note = Note::new(stored.nullifier, stored.secret);
        ensure!(
            note.commitment() == stored.commitment,
            "Note file commitment does not match its secrets"
        );
        build_circuit_inputs(&tree, &SinsemillaCommitter, &note, recipient)
            .context("Note cannot be claimed from this tree")
    })
    .await??;
    info!(
        root = %inputs.root,
        nullifier_hash = %inputs.nullifier_hash,
        depth = inputs.path_elements.len(),
        "Prepared claim"
    );

    let json = Zeroizing::new(serde_json::to_vec_pretty(&inputs)?);
    write_sensitive_output(&output, &json).await?;
    info!(file = ?output, "Exported circuit inputs");
    Ok(())
}

/// Prove prepared circuit inputs with the external prover and export the call data.
///
/// # Errors
/// Returns an error if the inputs cannot be read, the prover configuration is invalid, or a
/// pipeline step fails.
#[instrument(skip_all, fields(inputs = %inputs_file.display()))]
#[allow(clippy::print_stdout, reason = "Prints the call data to stdout")]
pub async fn claim_prove(
    inputs_file: PathBuf,
    prover: ProverConfig,
    output: PathBuf,
) -> eyre::Result<()> {
    let inputs: CircuitInputs = read_json(&inputs_file, "circuit inputs").await?;
    let pipeline = SnarkjsPipeline::new(prover.snarkjs_program, prover.pipeline.validate()?);

    let call_data = prove_circuit_inputs(&inputs, &prover.artifacts, &pipeline, &pipeline).await?;

    let proof = ProofOutput {
        root: inputs.root,
        nullifier_hash: inputs.nullifier_hash,
        recipient: inputs.recipient,
        call_data: call_data.0,
    };
    write_json(&output, &proof).await?;
    info!(file = ?output, "Exported proof");

    println!("{}", proof.call_data);
    Ok(())
}
