use std::path::PathBuf;

use eyre::ensure;
use rand_core::OsRng;
use tracing::{info, instrument};
use zeroize::Zeroizing;
use zkdrop_core::schema::note::NoteFile;
use zkdrop_merkle::{Note, init_hash_primitives};

use super::sensitive_output::write_sensitive_output;

/// Generate a random note, store its secrets and print its commitment.
///
/// The commitment is printed to stdout so it can be appended to a leaves file.
///
/// # Errors
/// Returns an error if `output` already exists or cannot be written.
#[instrument(skip_all, fields(output = %output.display()))]
#[allow(clippy::print_stdout, reason = "Prints the commitment to stdout")]
pub async fn note_new(output: PathBuf, overwrite: bool) -> eyre::Result<()> {
    ensure!(
        overwrite || !tokio::fs::try_exists(&output).await?,
        "Refusing to overwrite existing note file {}",
        output.display()
    );

    let note_file = tokio::task::spawn_blocking(|| {
        init_hash_primitives();
        let note = Note::random(&mut OsRng);
        NoteFile {
            commitment: note.commitment(),
            nullifier_hash: note.nullifier_hash(),
            nullifier: note.nullifier,
            secret: note.secret,
        }
    })
    .await?;

    let json = Zeroizing::new(serde_json::to_vec_pretty(&note_file)?);
    write_sensitive_output(&output, &json).await?;
    info!(commitment = %note_file.commitment, "Created note");

    println!("{}", note_file.commitment);
    Ok(())
}
