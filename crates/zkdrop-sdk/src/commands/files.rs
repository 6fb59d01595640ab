//! Reading and writing of the command file formats.

use std::path::Path;

use eyre::{Context as _, ensure};
use serde::Serialize;
use serde::de::DeserializeOwned;
use zkdrop_core::base::FieldElement;
use zkdrop_core::schema::config::AirdropConfiguration;
use zkdrop_merkle::MerkleTree;

use crate::circuit_input::ensure_root;

/// Read and decode a JSON file.
pub(super) async fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> eyre::Result<T> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {what} file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {what} JSON"))
}

/// Encode a value as pretty JSON and write it out.
pub(super) async fn write_json<T: Serialize>(path: &Path, value: &T) -> eyre::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Load a tree from its storage file.
pub(super) async fn load_tree(path: &Path) -> eyre::Result<MerkleTree> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read tree file {}", path.display()))?;
    MerkleTree::from_storage_string(&text)
        .with_context(|| format!("Failed to load tree from {}", path.display()))
}

/// Parse a leaves file: one field element per line, blank lines ignored.
pub(super) fn parse_leaves(text: &str) -> eyre::Result<Vec<FieldElement>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            line.parse::<FieldElement>()
                .with_context(|| format!("Invalid leaf on line {}", index.saturating_add(1)))
        })
        .collect()
}

/// Describe a built tree.
pub(super) fn airdrop_configuration(tree: &MerkleTree) -> eyre::Result<AirdropConfiguration> {
    Ok(AirdropConfiguration {
        merkle_root: tree.root(),
        leaf_count: u64::try_from(tree.leaf_count())?,
        depth: u32::try_from(tree.depth())?,
    })
}

/// Check that `tree` is the one described by `config`.
pub(super) fn ensure_matches_configuration(
    tree: &MerkleTree,
    config: &AirdropConfiguration,
) -> eyre::Result<()> {
    ensure_root(tree, config.merkle_root)?;
    let actual = airdrop_configuration(tree)?;
    ensure!(
        actual.leaf_count == config.leaf_count && actual.depth == config.depth,
        "Tree shape ({} leaves, depth {}) does not match the configuration ({} leaves, depth {})",
        actual.leaf_count,
        actual.depth,
        config.leaf_count,
        config.depth
    );
    Ok(())
}
