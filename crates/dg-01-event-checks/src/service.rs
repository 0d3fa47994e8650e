//! # Event Check Service
//!
//! Composes the checkers in admission order and exposes them through
//! [`EventCheckApi`].

use crate::config::EventRules;
use crate::domain::basic::BasicChecker;
use crate::domain::epoch::EpochChecker;
use crate::domain::errors::EventCheckError;
use crate::domain::heavy::HeavyChecker;
use crate::domain::parents::ParentsChecker;
use crate::metrics::CheckMetrics;
use crate::ports::inbound::EventCheckApi;
use crate::ports::outbound::{EpochReader, TxSigner};
use shared_types::{Event, EventHeader};
use std::sync::Arc;

/// All four checkers, wired to their collaborators.
pub struct EventCheckService {
    basic: BasicChecker,
    epoch: EpochChecker,
    parents: ParentsChecker,
    heavy: Arc<HeavyChecker>,
    metrics: Option<CheckMetrics>,
}

impl EventCheckService {
    pub fn new(
        rules: EventRules,
        epoch_reader: Arc<dyn EpochReader>,
        tx_signer: Arc<dyn TxSigner>,
    ) -> Self {
        Self {
            basic: BasicChecker::new(rules),
            epoch: EpochChecker::new(epoch_reader),
            parents: ParentsChecker::new(),
            heavy: Arc::new(HeavyChecker::new(tx_signer)),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: CheckMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Shared heavy checker, for building a [`crate::pool::HeavyCheckPool`].
    pub fn heavy(&self) -> Arc<HeavyChecker> {
        Arc::clone(&self.heavy)
    }

    pub fn basic(&self) -> &BasicChecker {
        &self.basic
    }

    /// Basic → Epoch → Parents, for self-authored events.
    pub fn validate_local(
        &self,
        event: &Event,
        parents: &[EventHeader],
    ) -> Result<(), EventCheckError> {
        let result = self
            .basic
            .validate(event)
            .and_then(|_| self.epoch.validate(event))
            .and_then(|_| self.parents.validate(event, parents));
        self.record(result)
    }

    fn record(&self, result: Result<(), EventCheckError>) -> Result<(), EventCheckError> {
        if let Some(metrics) = &self.metrics {
            metrics.record(&result);
        }
        result
    }
}

impl EventCheckApi for EventCheckService {
    fn validate_basic(&self, event: &Event) -> Result<(), EventCheckError> {
        self.record(self.basic.validate(event))
    }

    fn validate_light(&self, event: &Event) -> Result<(), EventCheckError> {
        let result = self
            .basic
            .validate(event)
            .and_then(|_| self.epoch.validate(event));
        self.record(result)
    }

    fn validate_ordered(
        &self,
        event: &Event,
        parents: &[EventHeader],
    ) -> Result<(), EventCheckError> {
        let result = self
            .epoch
            .validate(event)
            .and_then(|_| self.parents.validate(event, parents));
        self.record(result)
    }

    fn validate_all(&self, event: &Event, parents: &[EventHeader]) -> Result<(), EventCheckError> {
        let result = self
            .basic
            .validate(event)
            .and_then(|_| self.epoch.validate(event))
            .and_then(|_| self.parents.validate(event, parents))
            .and_then(|_| self.heavy.validate(event));
        self.record(result)
    }
}

/// One-shot Basic → Epoch → Parents → Heavy, returning the first error.
pub fn validate_all(
    rules: &EventRules,
    epoch_reader: Arc<dyn EpochReader>,
    tx_signer: Arc<dyn TxSigner>,
    event: &Event,
    parents: &[EventHeader],
) -> Result<(), EventCheckError> {
    EventCheckService::new(*rules, epoch_reader, tx_signer).validate_all(event, parents)
}
