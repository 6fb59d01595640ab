//! End-to-end properties of the commitment tree: storage round trips, proof soundness and the
//! error surface, with both the stub sum hasher and the production hashers.

use rand_core::OsRng;
use test_utils::{SumHasher, fe, fes, sum_tree};
use zkdrop_core::base::FieldElement;
use zkdrop_merkle::{MerkleTree, MerkleTreeError, Note, PoseidonHasher, init_hash_primitives};

fn note_tree(count: usize) -> (Vec<Note>, MerkleTree) {
    init_hash_primitives();
    let notes: Vec<Note> = (0..count).map(|_| Note::random(&mut OsRng)).collect();
    let leaves: Vec<FieldElement> = notes.iter().map(Note::commitment).collect();
    let tree = MerkleTree::from_leaves(&leaves, &PoseidonHasher).expect("power of two leaves");
    (notes, tree)
}

#[test]
fn storage_string_round_trip_is_byte_identical() {
    let (_, tree) = note_tree(8);
    let text = tree.storage_string();

    let reloaded = MerkleTree::from_storage_string(&text).expect("reload storage string");
    assert_eq!(reloaded.storage_string(), text);
    assert_eq!(reloaded.root(), tree.root());
    assert_eq!(reloaded.verify_hashes(&PoseidonHasher), Ok(()));
}

#[test]
fn every_leaf_proof_replays_to_the_root() {
    let (notes, tree) = note_tree(16);

    for (index, note) in notes.iter().enumerate() {
        let leaf = note.commitment();
        let proof = tree.merkle_proof(&leaf).expect("leaf is in the tree");

        assert_eq!(proof.depth(), 4);
        assert_eq!(proof.leaf_index(), u64::try_from(index).ok());
        assert_eq!(proof.compute_root(&leaf, &PoseidonHasher), tree.root());
        assert!(proof.verify(&leaf, &tree.root(), &PoseidonHasher));
    }
}

#[test]
fn four_leaf_sum_tree() {
    let tree = sum_tree(&[1, 2, 3, 4]);
    assert_eq!(tree.root(), fe!(10_u8));

    let proof = tree.merkle_proof(&fe!(3_u8)).expect("leaf is in the tree");
    assert_eq!(proof.path_bits, vec![0, 1]);
    assert_eq!(proof.siblings, fes![4_u8, 3_u8]);
    assert_eq!(proof.compute_root(&fe!(3_u8), &SumHasher), fe!(10_u8));
}

#[test]
fn dropping_a_leaf_value_is_malformed() {
    let text = sum_tree(&[1, 2, 3, 4]).storage_string();
    let (head, leaf_line) = text.rsplit_once('\n').expect("multi-line storage string");
    let shortened: Vec<&str> = leaf_line.split(',').skip(1).collect();
    let tampered = format!("{head}\n{}", shortened.join(","));

    let err = MerkleTree::from_storage_string(&tampered).expect_err("must not load");
    assert!(
        matches!(err, MerkleTreeError::MalformedSerialization { line: 3, .. }),
        "{err}"
    );
}

#[test]
fn leaf_counts_must_be_powers_of_two() {
    for count in [1_u64, 2, 4, 8] {
        let leaves: Vec<_> = (0..count).map(FieldElement::from).collect();
        let tree = MerkleTree::from_leaves(&leaves, &SumHasher).expect("power of two");
        assert_eq!(tree.leaf_count(), leaves.len());
    }
    for count in [0_u64, 3, 5, 6] {
        let leaves: Vec<_> = (0..count).map(FieldElement::from).collect();
        assert_eq!(
            MerkleTree::from_leaves(&leaves, &SumHasher),
            Err(MerkleTreeError::InvalidLeafCount(leaves.len()))
        );
    }
}

#[test]
fn absent_values_are_not_found() {
    let (_, tree) = note_tree(4);
    let stranger = Note::random(&mut OsRng).commitment();

    assert!(!tree.leaf_exists(&stranger));
    assert_eq!(
        tree.merkle_proof(&stranger),
        Err(MerkleTreeError::LeafNotFound(stranger))
    );
    assert!(matches!(
        tree.merkle_proof(&tree.root()),
        Err(MerkleTreeError::LeafNotFound(_))
    ));
}

#[test]
fn tampered_internal_hash_is_detected_on_request() {
    let tree = sum_tree(&[1, 2, 3, 4]);
    let text = tree.storage_string_with_width(1).replace("0x07", "0x08");

    let reloaded = MerkleTree::from_storage_string(&text).expect("loading does not rehash");
    assert_eq!(
        reloaded.verify_hashes(&SumHasher),
        Err(MerkleTreeError::HashMismatch { level: 1, index: 1 })
    );
}

const fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn built_tree_is_shared_across_reader_threads() {
    const _: () = assert_send_sync::<MerkleTree>();

    let (notes, tree) = note_tree(8);
    let leaves: Vec<FieldElement> = notes.iter().map(Note::commitment).collect();
    let expected_proofs: Vec<_> = leaves
        .iter()
        .map(|leaf| tree.merkle_proof(leaf).expect("leaf is in the tree"))
        .collect();
    let expected_storage = tree.storage_string();

    let tree = &tree;
    std::thread::scope(|scope| {
        let readers: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let proofs: Vec<_> = leaves
                        .iter()
                        .map(|leaf| tree.merkle_proof(leaf).expect("leaf is in the tree"))
                        .collect();
                    (proofs, tree.storage_string())
                })
            })
            .collect();

        for reader in readers {
            let (proofs, storage) = reader.join().expect("reader thread panicked");
            assert_eq!(proofs, expected_proofs);
            assert_eq!(storage, expected_storage);
        }
    });
}
