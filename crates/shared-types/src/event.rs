//! # DAG Events
//!
//! An event is a DAG vertex: a signed bundle of transactions that references
//! one or more parent events. When `seq > 1` the first parent is the
//! creator's previous event (the self-parent).

use crate::crypto::{keccak256, recover_address, sign_hash};
use crate::entities::{Address, Hash, ValidatorId};
use crate::errors::SignatureError;
use crate::merkle::merkle_root;
use crate::transaction::Transaction;
use k256::ecdsa::SigningKey;
use serde::{Deserialize, Serialize};

/// Event format version accepted by the admission pipeline.
pub const EVENT_VERSION: u8 = 1;

/// A signed DAG event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Event {
    /// Format version, must equal [`EVENT_VERSION`].
    pub version: u8,
    /// Epoch the event belongs to (1-based).
    pub epoch: u32,
    /// Per-creator sequence number (1-based).
    pub seq: u32,
    /// Consensus frame (1-based).
    pub frame: u32,
    /// Lamport timestamp: one more than the highest parent lamport.
    pub lamport: u32,
    /// Address of the creator's signing key.
    pub creator: ValidatorId,
    /// Parent hashes; self-parent first when `seq > 1`.
    pub parents: Vec<Hash>,
    /// Creation time asserted by the creator, unix nanoseconds.
    pub claimed_time: u64,
    /// Gas power consumed by this event.
    pub gas_power_used: u64,
    /// Gas power the creator has left after this event.
    pub gas_power_left: u64,
    /// Merkle root of the transaction hashes.
    pub tx_hash: Hash,
    /// Carried transactions.
    pub transactions: Vec<Transaction>,
    /// Opaque extra data.
    pub extra: Vec<u8>,
    /// Creator's signature (r ‖ s ‖ v) over [`Event::signing_hash`].
    pub sig: Vec<u8>,
}

#[derive(Serialize)]
struct EventSigningPayload<'a> {
    version: u8,
    epoch: u32,
    seq: u32,
    frame: u32,
    lamport: u32,
    creator: &'a ValidatorId,
    parents: &'a [Hash],
    claimed_time: u64,
    gas_power_used: u64,
    gas_power_left: u64,
    tx_hash: &'a Hash,
    extra: &'a [u8],
}

impl Event {
    /// Identity of the event: keccak-256 of its full encoding.
    pub fn hash(&self) -> Hash {
        keccak256(&bincode::serialize(self).unwrap_or_default())
    }

    /// Digest the creator signs. Transactions are bound through `tx_hash`.
    pub fn signing_hash(&self) -> Hash {
        let payload = EventSigningPayload {
            version: self.version,
            epoch: self.epoch,
            seq: self.seq,
            frame: self.frame,
            lamport: self.lamport,
            creator: &self.creator,
            parents: &self.parents,
            claimed_time: self.claimed_time,
            gas_power_used: self.gas_power_used,
            gas_power_left: self.gas_power_left,
            tx_hash: &self.tx_hash,
            extra: &self.extra,
        };
        keccak256(&bincode::serialize(&payload).unwrap_or_default())
    }

    /// Encoded size in bytes.
    pub fn encoded_size(&self) -> usize {
        bincode::serialized_size(self)
            .map(|size| usize::try_from(size).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX)
    }

    /// The creator's previous event, present iff `seq > 1` and parents exist.
    pub fn self_parent(&self) -> Option<&Hash> {
        if self.seq > 1 {
            self.parents.first()
        } else {
            None
        }
    }

    /// Whether `hash` is this event's self-parent.
    pub fn is_self_parent(&self, hash: &Hash) -> bool {
        self.self_parent() == Some(hash)
    }

    /// Merkle root over the carried transactions.
    pub fn calc_tx_hash(&self) -> Hash {
        let leaves: Vec<Hash> = self.transactions.iter().map(Transaction::hash).collect();
        merkle_root(&leaves)
    }

    /// Address recovered from `sig` over [`Event::signing_hash`].
    pub fn signer(&self) -> Result<Address, SignatureError> {
        recover_address(&self.signing_hash(), &self.sig)
    }

    /// Sign the event with the creator key, replacing `sig`.
    ///
    /// `creator` and `tx_hash` must already be final.
    pub fn sign(&mut self, key: &SigningKey) -> Result<(), SignatureError> {
        self.sig = sign_hash(key, &self.signing_hash())?.to_vec();
        Ok(())
    }

    /// Project to the header used when this event is somebody's parent.
    pub fn header(&self) -> EventHeader {
        EventHeader {
            hash: self.hash(),
            creator: self.creator,
            epoch: self.epoch,
            seq: self.seq,
            frame: self.frame,
            lamport: self.lamport,
            claimed_time: self.claimed_time,
            parents: self.parents.clone(),
            gas_power_used: self.gas_power_used,
            gas_power_left: self.gas_power_left,
        }
    }
}

/// Header view of an already-connected event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EventHeader {
    pub hash: Hash,
    pub creator: ValidatorId,
    pub epoch: u32,
    pub seq: u32,
    pub frame: u32,
    pub lamport: u32,
    pub claimed_time: u64,
    pub parents: Vec<Hash>,
    pub gas_power_used: u64,
    pub gas_power_left: u64,
}
