//! Commitment Merkle accumulator for private airdrop claims.
//!
//! A [`MerkleTree`] is built once, either from its leaves or from its storage string, and is
//! immutable afterwards. Internal nodes use the Poseidon two-to-one compression; leaf
//! commitments and nullifier hashes use the Sinsemilla commitment hash.

mod commitment;
mod error;
mod hash;
mod node;
mod proof;
mod storage;
mod tree;

pub use commitment::{Note, leaf_commitment, nullifier_hash};
pub use error::{MerkleTreeError, validate_leaf_count};
pub use hash::{
    COMMIT_PERSONALIZATION, Committer, NodeHasher, PoseidonHasher, SinsemillaCommitter, commit,
    compress2to1, init_hash_primitives,
};
pub use proof::MerkleProof;
pub use tree::MerkleTree;
