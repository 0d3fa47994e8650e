//! # Incomplete Events
//!
//! LRU of events waiting for at least one parent, keyed by event hash and
//! bounded by count and total encoded size.
//!
//! Inserting past either bound spills least-recently-used entries and hands
//! them back to the caller. An event larger than `max_bytes` on its own is
//! spilled immediately.

use crate::config::BufferLimit;
use lru::LruCache;
use shared_types::{Event, Hash, PeerId};
use std::sync::Arc;

/// An event held by the buffer together with the peer that sent it.
#[derive(Debug, Clone)]
pub struct BufferedEvent {
    pub event: Arc<Event>,
    pub peer: PeerId,
    pub hash: Hash,
    /// Encoded size, charged against `max_bytes`.
    pub size: usize,
}

impl BufferedEvent {
    pub fn new(event: Arc<Event>, peer: PeerId) -> Self {
        let hash = event.hash();
        let size = event.encoded_size();
        Self {
            event,
            peer,
            hash,
            size,
        }
    }

    /// Whether `parent` is among this event's declared parents.
    pub fn has_parent(&self, parent: &Hash) -> bool {
        self.event.parents.contains(parent)
    }
}

/// Size- and count-bounded LRU of buffered events.
pub struct IncompleteEvents {
    events: LruCache<Hash, BufferedEvent>,
    total_bytes: usize,
    limit: BufferLimit,
}

impl IncompleteEvents {
    pub fn new(limit: BufferLimit) -> Self {
        Self {
            events: LruCache::unbounded(),
            total_bytes: 0,
            limit,
        }
    }

    /// Insert or refresh `item`, returning whatever had to be spilled.
    pub fn insert(&mut self, item: BufferedEvent) -> Vec<BufferedEvent> {
        let size = item.size;
        if let Some(replaced) = self.events.put(item.hash, item) {
            self.total_bytes -= replaced.size;
        }
        self.total_bytes += size;

        let mut evicted = Vec::new();
        while self.over_limit() {
            match self.events.pop_lru() {
                Some((_, spilled)) => {
                    self.total_bytes -= spilled.size;
                    evicted.push(spilled);
                }
                None => break,
            }
        }
        evicted
    }

    /// Mark `hash` as recently used, if buffered.
    pub fn touch(&mut self, hash: &Hash) {
        self.events.promote(hash);
    }

    pub fn remove(&mut self, hash: &Hash) -> Option<BufferedEvent> {
        let removed = self.events.pop(hash)?;
        self.total_bytes -= removed.size;
        Some(removed)
    }

    /// Membership test that does not affect recency.
    pub fn contains(&self, hash: &Hash) -> bool {
        self.events.contains(hash)
    }

    /// Buffered events that declare `parent`, most recently used first.
    pub fn children_of(&self, parent: &Hash) -> Vec<BufferedEvent> {
        self.events
            .iter()
            .filter(|(_, item)| item.has_parent(parent))
            .map(|(_, item)| item.clone())
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.total_bytes = 0;
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    fn over_limit(&self) -> bool {
        !self.events.is_empty()
            && (self.events.len() > self.limit.max_events
                || self.total_bytes > self.limit.max_bytes)
    }
}
