//! # secp256k1 Transaction Signer
//!
//! Chain-bound sender recovery for [`Transaction`]s.

use crate::ports::outbound::{TxSigner, TxSignerError};
use shared_types::{recover_address, Address, Hash, Transaction};

/// Recovers senders of transactions signed for one chain id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcdsaTxSigner {
    chain_id: u64,
}

impl EcdsaTxSigner {
    pub fn new(chain_id: u64) -> Self {
        Self { chain_id }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

impl TxSigner for EcdsaTxSigner {
    fn signing_hash(&self, tx: &Transaction) -> Hash {
        tx.signing_hash(self.chain_id)
    }

    fn recover(&self, tx: &Transaction, signing_hash: &Hash) -> Result<Address, TxSignerError> {
        Ok(recover_address(signing_hash, &tx.sig)?)
    }
}
