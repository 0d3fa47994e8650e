//! # Test Helpers
//!
//! Signing identities and event builders for tests. Enabled for this crate's
//! own tests and, for downstream crates, through the `test-helpers` feature.

use crate::crypto::address_from_pubkey;
use crate::entities::{Address, Hash, ValidatorId};
use crate::event::{Event, EVENT_VERSION};
use crate::transaction::Transaction;
use crate::validators::ValidatorSet;
use k256::ecdsa::SigningKey;

/// Chain id used by test transactions.
pub const TEST_CHAIN_ID: u64 = 4003;

/// A validator key and its address.
#[derive(Clone)]
pub struct TestValidator {
    pub key: SigningKey,
    pub id: ValidatorId,
}

impl TestValidator {
    /// Deterministic identity; `seed` must be non-zero.
    pub fn from_seed(seed: u8) -> Self {
        let mut secret = [0u8; 32];
        secret[31] = seed.max(1);
        secret[0] = 0x01;
        let key = SigningKey::from_slice(&secret).expect("seeded scalar is in range");
        Self::from_key(key)
    }

    /// Random identity.
    pub fn random() -> Self {
        Self::from_key(SigningKey::random(&mut rand::thread_rng()))
    }

    fn from_key(key: SigningKey) -> Self {
        let id = address_from_pubkey(key.verifying_key());
        Self { key, id }
    }

    /// Unsigned first event (`seq == 1`) of this validator in `epoch`.
    pub fn genesis_event(&self, epoch: u32, parents: Vec<Hash>, lamport: u32) -> Event {
        Event {
            version: EVENT_VERSION,
            epoch,
            seq: 1,
            frame: 1,
            lamport,
            creator: self.id,
            parents,
            claimed_time: 1_000_000_000,
            gas_power_left: 10_000_000,
            ..Default::default()
        }
    }

    /// Unsigned event following `self_parent` (placed first in `parents`).
    pub fn next_event(&self, self_parent: &Event, other_parents: &[Hash], lamport: u32) -> Event {
        let mut parents = Vec::with_capacity(other_parents.len() + 1);
        parents.push(self_parent.hash());
        parents.extend_from_slice(other_parents);
        Event {
            version: EVENT_VERSION,
            epoch: self_parent.epoch,
            seq: self_parent.seq + 1,
            frame: self_parent.frame,
            lamport,
            creator: self.id,
            parents,
            claimed_time: self_parent.claimed_time + 1_000,
            gas_power_left: self_parent.gas_power_left,
            ..Default::default()
        }
    }

    /// Fix `tx_hash` and sign `event` in place.
    pub fn seal(&self, event: &mut Event) {
        event.tx_hash = event.calc_tx_hash();
        event.sign(&self.key).expect("signing with a valid key");
    }

    /// A transfer signed by this validator.
    pub fn transfer(&self, nonce: u64, to: Address, value: i128) -> Transaction {
        let mut tx = Transaction {
            nonce,
            gas_price: 1,
            gas: 21_000,
            to: Some(to),
            value,
            ..Default::default()
        };
        tx.sign(&self.key, TEST_CHAIN_ID)
            .expect("signing with a valid key");
        tx
    }
}

/// Validator set with unit weights.
pub fn validator_set(epoch: u32, validators: &[TestValidator]) -> ValidatorSet {
    ValidatorSet::new(epoch, validators.iter().map(|v| (v.id, 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_validators_are_distinct_and_stable() {
        let a = TestValidator::from_seed(1);
        let b = TestValidator::from_seed(2);
        assert_ne!(a.id, b.id);
        assert_eq!(a.id, TestValidator::from_seed(1).id);
    }

    #[test]
    fn test_sealed_event_recovers_creator() {
        let v = TestValidator::from_seed(5);
        let mut event = v.genesis_event(1, vec![], 1);
        event.transactions.push(v.transfer(0, [1u8; 20], 10));
        v.seal(&mut event);

        assert_eq!(event.signer().unwrap(), v.id);
        assert_eq!(event.tx_hash, event.calc_tx_hash());
    }

    #[test]
    fn test_next_event_links_self_parent() {
        let v = TestValidator::random();
        let mut first = v.genesis_event(1, vec![], 1);
        v.seal(&mut first);
        let second = v.next_event(&first, &[], 2);

        assert_eq!(second.seq, 2);
        assert!(second.is_self_parent(&first.hash()));
        assert!(second.claimed_time > first.claimed_time);
    }
}
