//! # Outbound Ports
//!
//! Callbacks into the host. The buffer never holds its lock while calling
//! any of them, so implementations may call back into the buffer.

use dg_01_event_checks::EventCheckError;
use shared_types::{Event, EventHeader, Hash, PeerId};
use std::sync::Arc;

/// Read access to the connected DAG.
pub trait EventStore: Send + Sync {
    /// Whether `hash` is already connected.
    fn exists(&self, hash: &Hash) -> bool;

    /// Header of a connected event.
    fn get(&self, hash: &Hash) -> Option<EventHeader>;
}

/// Connects an event whose parents are all connected and checks passed.
pub trait EventProcessor: Send + Sync {
    /// Returns a reason on rejection; the event is then dropped.
    fn process(&self, event: &Arc<Event>) -> Result<(), String>;
}

/// Notified of every event that reaches a terminal state without being
/// processed.
pub trait DropSink: Send + Sync {
    fn on_dropped(&self, event: &Arc<Event>, peer: &PeerId, err: &EventCheckError);
}

/// Check run once all parents are resolved, before processing.
pub trait EventCheck: Send + Sync {
    fn check(&self, event: &Event, parents: &[EventHeader]) -> Result<(), EventCheckError>;
}

/// Notified when a buffered event is spilled to respect the buffer bounds.
/// The host may re-request it from `peer` later.
pub trait EvictionHook: Send + Sync {
    fn on_evicted(&self, event: &Arc<Event>, peer: &PeerId);
}

/// Penalises peers that relayed ban-worthy events.
pub trait PeerReporter: Send + Sync {
    fn misbehaved(&self, peer: &PeerId, err: &EventCheckError);
}

/// The full set of callbacks an [`crate::EventsBuffer`] is built with.
#[derive(Clone)]
pub struct OrderingCallbacks {
    pub store: Arc<dyn EventStore>,
    pub processor: Arc<dyn EventProcessor>,
    pub drops: Arc<dyn DropSink>,
    /// Skipped when `None`; parents are still resolved.
    pub check: Option<Arc<dyn EventCheck>>,
    pub evicted: Option<Arc<dyn EvictionHook>>,
}
