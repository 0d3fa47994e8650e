//! # Core Identifiers
//!
//! Fixed-size identifiers used across the admission crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte keccak-256 hash.
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// Identity of an event creator: the address of its secp256k1 signing key.
pub type ValidatorId = Address;

/// Unique identifier for a node in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct NodeId(pub [u8; 32]);

impl NodeId {
    /// Pseudo-peer used as the origin of self-authored events.
    pub const LOCAL: NodeId = NodeId([0u8; 32]);

    /// Whether this id is [`NodeId::LOCAL`].
    pub fn is_local(&self) -> bool {
        *self == Self::LOCAL
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_local() {
            return f.write_str("local");
        }
        // Short form is enough to correlate log lines.
        write!(f, "{}", hex::encode(&self.0[..8]))
    }
}

/// A peer identifier (alias for `NodeId` in peer contexts).
pub type PeerId = NodeId;

/// Hex rendering of a hash for log fields.
pub fn short_hash(hash: &Hash) -> String {
    hex::encode(&hash[..8])
}
