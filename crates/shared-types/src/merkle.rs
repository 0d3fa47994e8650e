//! # Transaction Merkle Root
//!
//! Binary hash tree over transaction hashes. Each non-leaf node is
//! `keccak256(left || right)`.
//!
//! - Leaves are padded to the nearest power of two (minimum 2) with
//!   [`SENTINEL_HASH`].
//! - An empty list has root [`SENTINEL_HASH`].
//! - Same leaves in the same order always produce the same root.

use crate::entities::Hash;
use sha3::{Digest, Keccak256};

/// Padding leaf and root of the empty tree.
pub const SENTINEL_HASH: Hash = [0u8; 32];

/// Compute the Merkle root of `leaves`.
pub fn merkle_root(leaves: &[Hash]) -> Hash {
    if leaves.is_empty() {
        return SENTINEL_HASH;
    }

    let padded_leaf_count = leaves.len().next_power_of_two().max(2);
    let mut level = Vec::with_capacity(padded_leaf_count);
    level.extend_from_slice(leaves);
    level.resize(padded_leaf_count, SENTINEL_HASH);

    while level.len() > 1 {
        level = level
            .chunks_exact(2)
            .map(|pair| hash_pair(&pair[0], &pair[1]))
            .collect();
    }

    level[0]
}

fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}
