//! # Gossiped Transactions
//!
//! Transactions travel inside events. Amounts are signed on the wire so a
//! negative value or gas price is representable and can be rejected by the
//! basic checks instead of failing deserialization.

use crate::crypto::{keccak256, sign_hash, SIGNATURE_LEN};
use crate::entities::{Address, Hash};
use crate::errors::SignatureError;
use k256::ecdsa::SigningKey;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use std::fmt;

/// A signed transaction carried in an event.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sender's nonce.
    pub nonce: u64,
    /// Price per unit of gas.
    pub gas_price: i128,
    /// Gas limit.
    pub gas: u64,
    /// Recipient, `None` for contract creation.
    pub to: Option<Address>,
    /// Transferred amount.
    pub value: i128,
    /// Call data or init code.
    pub data: Vec<u8>,
    /// Sender's signature (r ‖ s ‖ v) over [`Transaction::signing_hash`].
    #[serde_as(as = "Bytes")]
    pub sig: [u8; SIGNATURE_LEN],
    /// Recovered sender, memory only.
    #[serde(skip)]
    pub sender: SenderCache,
}

impl Default for Transaction {
    fn default() -> Self {
        Self {
            nonce: 0,
            gas_price: 0,
            gas: 0,
            to: None,
            value: 0,
            data: Vec::new(),
            sig: [0u8; SIGNATURE_LEN],
            sender: SenderCache::default(),
        }
    }
}

#[derive(Serialize)]
struct TxSigningPayload<'a> {
    nonce: u64,
    gas_price: i128,
    gas: u64,
    to: &'a Option<Address>,
    value: i128,
    data: &'a [u8],
    chain_id: u64,
}

impl Transaction {
    /// Digest the sender signs, bound to `chain_id`.
    pub fn signing_hash(&self, chain_id: u64) -> Hash {
        let payload = TxSigningPayload {
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas: self.gas,
            to: &self.to,
            value: self.value,
            data: &self.data,
            chain_id,
        };
        keccak256(&bincode::serialize(&payload).unwrap_or_default())
    }

    /// Identity of the transaction, used as a Merkle leaf.
    pub fn hash(&self) -> Hash {
        keccak256(&bincode::serialize(self).unwrap_or_default())
    }

    /// Sign the transaction for `chain_id`, replacing `sig` and clearing the cache.
    pub fn sign(&mut self, key: &SigningKey, chain_id: u64) -> Result<(), SignatureError> {
        self.sig = sign_hash(key, &self.signing_hash(chain_id))?;
        self.sender.clear();
        Ok(())
    }

    /// Sender recorded against `signing_hash` and the current `sig`, if any.
    pub fn cached_sender(&self, signing_hash: &Hash) -> Option<Address> {
        self.sender.get(&self.sender_key(signing_hash))
    }

    /// Record the sender recovered from `signing_hash` and the current `sig`.
    pub fn cache_sender(&self, signing_hash: Hash, sender: Address) {
        self.sender.set(self.sender_key(&signing_hash), sender);
    }

    fn sender_key(&self, signing_hash: &Hash) -> Hash {
        let mut preimage = [0u8; 32 + SIGNATURE_LEN];
        preimage[..32].copy_from_slice(signing_hash);
        preimage[32..].copy_from_slice(&self.sig);
        keccak256(&preimage)
    }
}

/// In-memory cache of a transaction's recovered sender.
///
/// The entry is keyed by the signing hash and signature it was recovered
/// from, so a transaction mutated after recovery never reports a stale
/// sender. The
/// cache takes no part in equality or serialization.
#[derive(Default)]
pub struct SenderCache(RwLock<Option<(Hash, Address)>>);

impl SenderCache {
    /// Cached sender, honoured only while `key` still matches.
    pub fn get(&self, key: &Hash) -> Option<Address> {
        match *self.0.read() {
            Some((cached, sender)) if cached == *key => Some(sender),
            _ => None,
        }
    }

    /// Overwrite the cached entry.
    pub fn set(&self, key: Hash, sender: Address) {
        *self.0.write() = Some((key, sender));
    }

    /// Drop the cached entry.
    pub fn clear(&self) {
        *self.0.write() = None;
    }

    /// Whether a sender is cached for any hash.
    pub fn is_populated(&self) -> bool {
        self.0.read().is_some()
    }
}

impl Clone for SenderCache {
    fn clone(&self) -> Self {
        Self(RwLock::new(*self.0.read()))
    }
}

impl PartialEq for SenderCache {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for SenderCache {}

impl fmt::Debug for SenderCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.0.read() {
            Some((_, sender)) => write!(f, "SenderCache({})", hex::encode(sender)),
            None => f.write_str("SenderCache(empty)"),
        }
    }
}
