//! # In-Memory Epoch State
//!
//! [`EpochReader`] backed by a swappable validator set. Hosts advance it
//! when the consensus layer seals an epoch.

use crate::ports::outbound::EpochReader;
use parking_lot::RwLock;
use shared_types::ValidatorSet;
use std::sync::Arc;
use tracing::info;

/// Current epoch held in memory.
pub struct StaticEpochReader {
    current: RwLock<Arc<ValidatorSet>>,
}

impl StaticEpochReader {
    /// Start at `validators.epoch`.
    pub fn new(validators: ValidatorSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(validators)),
        }
    }

    /// Switch to a new epoch.
    pub fn advance(&self, validators: ValidatorSet) {
        info!(
            epoch = validators.epoch,
            validators = validators.len(),
            "Advancing epoch"
        );
        *self.current.write() = Arc::new(validators);
    }
}

impl EpochReader for StaticEpochReader {
    fn epoch_validators(&self) -> (Arc<ValidatorSet>, u32) {
        let current = Arc::clone(&self.current.read());
        let epoch = current.epoch;
        (current, epoch)
    }
}
