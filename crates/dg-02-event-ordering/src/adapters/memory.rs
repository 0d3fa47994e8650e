//! # In-Memory DAG
//!
//! [`EventStore`] and [`EventProcessor`] over a hash map, for tests and
//! single-process hosts. Keeps the order events were connected in.

use crate::ports::outbound::{EventProcessor, EventStore};
use parking_lot::RwLock;
use shared_types::{Event, EventHeader, Hash};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
struct DagState {
    events: HashMap<Hash, (Arc<Event>, EventHeader)>,
    order: Vec<Hash>,
    rejected: HashMap<Hash, String>,
}

/// Connected events held in memory.
#[derive(Default)]
pub struct InMemoryDag {
    state: RwLock<DagState>,
}

impl InMemoryDag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hashes in the order they were connected.
    pub fn connected_order(&self) -> Vec<Hash> {
        self.state.read().order.clone()
    }

    pub fn get_event(&self, hash: &Hash) -> Option<Arc<Event>> {
        self.state.read().events.get(hash).map(|(event, _)| Arc::clone(event))
    }

    pub fn len(&self) -> usize {
        self.state.read().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().events.is_empty()
    }

    /// Make `process` refuse `hash` with `reason`.
    pub fn reject(&self, hash: Hash, reason: impl Into<String>) {
        self.state.write().rejected.insert(hash, reason.into());
    }
}

impl EventStore for InMemoryDag {
    fn exists(&self, hash: &Hash) -> bool {
        self.state.read().events.contains_key(hash)
    }

    fn get(&self, hash: &Hash) -> Option<EventHeader> {
        self.state.read().events.get(hash).map(|(_, header)| header.clone())
    }
}

impl EventProcessor for InMemoryDag {
    fn process(&self, event: &Arc<Event>) -> Result<(), String> {
        let header = event.header();
        let mut state = self.state.write();
        if let Some(reason) = state.rejected.get(&header.hash) {
            return Err(reason.clone());
        }
        if state.events.contains_key(&header.hash) {
            return Err(format!("event {} already connected", hex::encode(header.hash)));
        }
        if let Some(missing) = event
            .parents
            .iter()
            .find(|parent| !state.events.contains_key(*parent))
        {
            return Err(format!("parent {} not connected", hex::encode(missing)));
        }
        state.order.push(header.hash);
        state.events.insert(header.hash, (Arc::clone(event), header));
        Ok(())
    }
}
