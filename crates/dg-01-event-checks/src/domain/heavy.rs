//! # Heavy Checker
//!
//! Cryptographic checks: creator signature, transaction senders and the
//! transaction Merkle root. Expensive, so normally run on the worker pool
//! (see [`crate::pool::HeavyCheckPool`]).

use super::errors::EventCheckError;
use crate::ports::inbound::EventValidator;
use crate::ports::outbound::{TxSigner, TxSignerError};
use shared_types::{Address, Event, Transaction};
use std::sync::Arc;
use tracing::trace;

/// Signature and commitment checks.
#[derive(Clone)]
pub struct HeavyChecker {
    tx_signer: Arc<dyn TxSigner>,
}

impl HeavyChecker {
    pub fn new(tx_signer: Arc<dyn TxSigner>) -> Self {
        Self { tx_signer }
    }

    #[tracing::instrument(level = "trace", skip_all, fields(creator = %hex::encode(event.creator), seq = event.seq))]
    pub fn validate(&self, event: &Event) -> Result<(), EventCheckError> {
        match event.signer() {
            Ok(signer) if signer == event.creator => {}
            _ => return Err(EventCheckError::WrongEventSig),
        }

        for (index, tx) in event.transactions.iter().enumerate() {
            tx_sender(self.tx_signer.as_ref(), tx).map_err(|e| {
                EventCheckError::MalformedTxSig {
                    index,
                    reason: e.to_string(),
                }
            })?;
        }

        if event.calc_tx_hash() != event.tx_hash {
            return Err(EventCheckError::WrongTxHash);
        }

        trace!("heavy checks passed");
        Ok(())
    }
}

impl EventValidator for HeavyChecker {
    fn validate(&self, event: &Event) -> Result<(), EventCheckError> {
        HeavyChecker::validate(self, event)
    }
}

/// Sender of `tx`, served from the transaction's cache when its signing hash
/// still matches, otherwise recovered and cached.
pub fn tx_sender(signer: &dyn TxSigner, tx: &Transaction) -> Result<Address, TxSignerError> {
    let signing_hash = signer.signing_hash(tx);
    if let Some(sender) = tx.cached_sender(&signing_hash) {
        return Ok(sender);
    }
    let sender = signer.recover(tx, &signing_hash)?;
    tx.cache_sender(signing_hash, sender);
    Ok(sender)
}
