//! # Epoch Checker
//!
//! Admits only events of the current epoch created by one of its validators.

use super::errors::EventCheckError;
use crate::ports::inbound::EventValidator;
use crate::ports::outbound::EpochReader;
use shared_types::Event;
use std::sync::Arc;

/// Checks epoch membership against an [`EpochReader`].
#[derive(Clone)]
pub struct EpochChecker {
    reader: Arc<dyn EpochReader>,
}

impl EpochChecker {
    pub fn new(reader: Arc<dyn EpochReader>) -> Self {
        Self { reader }
    }

    pub fn validate(&self, event: &Event) -> Result<(), EventCheckError> {
        let (validators, epoch) = self.reader.epoch_validators();
        if event.epoch != epoch {
            return Err(EventCheckError::NotRelevant {
                event: event.epoch,
                current: epoch,
            });
        }
        if !validators.contains(&event.creator) {
            return Err(EventCheckError::Auth);
        }
        Ok(())
    }
}

impl EventValidator for EpochChecker {
    fn validate(&self, event: &Event) -> Result<(), EventCheckError> {
        EpochChecker::validate(self, event)
    }
}
