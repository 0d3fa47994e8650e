//! # Inbound Ports
//!
//! APIs this subsystem exposes to the ordering buffer and the host.

use crate::domain::errors::EventCheckError;
use shared_types::{Event, EventHeader};

/// A check that needs nothing but the event itself.
pub trait EventValidator: Send + Sync {
    fn validate(&self, event: &Event) -> Result<(), EventCheckError>;
}

/// Composed check stages.
pub trait EventCheckApi: Send + Sync {
    /// Basic checks only; safe on the receive path.
    fn validate_basic(&self, event: &Event) -> Result<(), EventCheckError>;

    /// Basic then epoch checks. Everything that needs neither parents nor
    /// signature recovery, so non-validators are turned away before any
    /// heavy work is queued.
    fn validate_light(&self, event: &Event) -> Result<(), EventCheckError>;

    /// Epoch then parents checks, for events whose parents are resolved and
    /// whose basic and heavy checks already passed.
    fn validate_ordered(
        &self,
        event: &Event,
        parents: &[EventHeader],
    ) -> Result<(), EventCheckError>;

    /// Basic → Epoch → Parents → Heavy.
    fn validate_all(&self, event: &Event, parents: &[EventHeader]) -> Result<(), EventCheckError>;
}
