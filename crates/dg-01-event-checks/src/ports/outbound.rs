//! # Outbound Ports
//!
//! Collaborators the checkers read from. Implementations must be cheap and
//! non-blocking; they are called on gossip and worker threads.

use shared_types::{Address, Hash, SignatureError, Transaction, ValidatorSet};
use std::sync::Arc;
use thiserror::Error;

/// Source of the current epoch and its validators.
pub trait EpochReader: Send + Sync {
    /// The current validator set and epoch number.
    fn epoch_validators(&self) -> (Arc<ValidatorSet>, u32);
}

/// Recovers transaction senders.
///
/// Callers cache the result on the transaction keyed by [`TxSigner::signing_hash`].
pub trait TxSigner: Send + Sync {
    /// The digest a sender signs for this signer's chain rules.
    fn signing_hash(&self, tx: &Transaction) -> Hash;

    /// Recover the sender of `tx` given its signing hash.
    fn recover(&self, tx: &Transaction, signing_hash: &Hash) -> Result<Address, TxSignerError>;
}

/// Sender recovery failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxSignerError {
    #[error("Invalid transaction signature: {0}")]
    InvalidSignature(#[from] SignatureError),
}
