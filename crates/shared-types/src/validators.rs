//! # Validator Set
//!
//! The validators entitled to create events in one epoch, with their weights.

use crate::entities::ValidatorId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Validator set of a single epoch.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ValidatorSet {
    pub epoch: u32,
    weights: HashMap<ValidatorId, u64>,
    total_weight: u64,
}

impl ValidatorSet {
    /// Create a validator set from `(id, weight)` pairs. Later duplicates win.
    pub fn new(epoch: u32, validators: impl IntoIterator<Item = (ValidatorId, u64)>) -> Self {
        let weights: HashMap<ValidatorId, u64> = validators.into_iter().collect();
        let total_weight = weights.values().fold(0u64, |acc, w| acc.saturating_add(*w));
        Self {
            epoch,
            weights,
            total_weight,
        }
    }

    /// Get the number of validators
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Check if a validator is in the set
    pub fn contains(&self, validator_id: &ValidatorId) -> bool {
        self.weights.contains_key(validator_id)
    }

    /// Weight of a validator, if a member.
    pub fn weight(&self, validator_id: &ValidatorId) -> Option<u64> {
        self.weights.get(validator_id).copied()
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Iterate over member ids.
    pub fn ids(&self) -> impl Iterator<Item = &ValidatorId> {
        self.weights.keys()
    }
}
