use std::path::PathBuf;

use eyre::Context as _;
use serde::Serialize;
use tracing::{info, instrument};
use zkdrop_core::base::FieldElement;
use zkdrop_core::schema::config::AirdropConfiguration;
use zkdrop_merkle::{MerkleProof, MerkleTree, PoseidonHasher};

use super::files::{
    airdrop_configuration, ensure_matches_configuration, load_tree, parse_leaves, read_json,
    write_json,
};

/// Inclusion proof of one leaf, as printed by `tree proof`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LeafProof {
    leaf: FieldElement,
    root: FieldElement,
    leaf_index: Option<u64>,
    #[serde(flatten)]
    proof: MerkleProof,
}

/// Build the commitment tree from a leaves file and export it with its configuration.
///
/// # Errors
/// Returns an error if the leaves cannot be read or parsed, their number is not a power of
/// two, or an output cannot be written.
#[instrument(skip_all, fields(leaves = %leaves_file.display()))]
pub async fn tree_build(
    leaves_file: PathBuf,
    tree_out: PathBuf,
    config_out: PathBuf,
) -> eyre::Result<()> {
    let text = tokio::fs::read_to_string(&leaves_file)
        .await
        .with_context(|| format!("Failed to read leaves file {}", leaves_file.display()))?;
    let leaves = parse_leaves(&text)?;
    info!(count = leaves.len(), "Building commitment tree");

    let tree =
        tokio::task::spawn_blocking(move || MerkleTree::from_leaves(&leaves, &PoseidonHasher))
            .await??;

    tokio::fs::write(&tree_out, tree.storage_string())
        .await
        .with_context(|| format!("Failed to write {}", tree_out.display()))?;
    info!(file = ?tree_out, "Exported tree");

    let config = airdrop_configuration(&tree)?;
    write_json(&config_out, &config).await?;
    info!(root = %config.merkle_root, file = ?config_out, "Exported configuration");
    Ok(())
}

/// Recompute every internal hash of a stored tree, optionally checking it against a
/// configuration.
///
/// # Errors
/// Returns an error if the tree cannot be loaded, a stored hash is wrong, or the tree does
/// not match the configuration.
#[instrument(skip_all, fields(tree = %tree_file.display()))]
pub async fn tree_verify(tree_file: PathBuf, config_file: Option<PathBuf>) -> eyre::Result<()> {
    let tree = load_tree(&tree_file).await?;

    let tree = tokio::task::spawn_blocking(move || {
        tree.verify_hashes(&PoseidonHasher).map(|()| tree)
    })
    .await??;
    info!(root = %tree.root(), leaves = tree.leaf_count(), "Stored hashes are consistent");

    if let Some(config_file) = config_file {
        let config: AirdropConfiguration = read_json(&config_file, "configuration").await?;
        ensure_matches_configuration(&tree, &config)?;
        info!(file = ?config_file, "Tree matches configuration");
    }
    Ok(())
}

/// Print, or write to `output`, the inclusion proof of `leaf`.
///
/// # Errors
/// Returns an error if the tree cannot be loaded, `leaf` is not in it, or the output cannot be
/// written.
#[instrument(skip_all, fields(tree = %tree_file.display(), %leaf))]
#[allow(clippy::print_stdout, reason = "Prints the proof to stdout")]
pub async fn tree_proof(
    tree_file: PathBuf,
    leaf: FieldElement,
    output: Option<PathBuf>,
) -> eyre::Result<()> {
    let tree = load_tree(&tree_file).await?;
    let proof = tree.merkle_proof(&leaf)?;
    let report = LeafProof {
        leaf,
        root: tree.root(),
        leaf_index: proof.leaf_index(),
        proof,
    };

    match output {
        Some(path) => {
            write_json(&path, &report).await?;
            info!(file = ?path, "Exported proof");
        }
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
