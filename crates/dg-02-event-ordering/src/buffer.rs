//! # Events Buffer
//!
//! Reorder buffer between gossip and the DAG.
//!
//! ## Push Algorithm
//!
//! 1. Already connected: drop with `AlreadyConnected`.
//! 2. Touch every parent in the LRU and resolve it through the store. Any
//!    parent missing: buffer the event under its own hash and stop.
//! 3. Run the optional check; failure drops the event.
//! 4. Process; failure drops the event.
//! 5. Remove the event from the LRU.
//! 6. Re-examine buffered events that name it as a parent and connect those
//!    that are now complete, repeating for each one connected.
//!
//! ## Concurrency
//!
//! The LRU sits behind a mutex that is never held across a callback. A
//! buffered event is only connected by whoever removes it from the LRU, so
//! two cascades cannot both process it. After buffering, the pusher
//! resolves the parents once more: a parent connected concurrently may have
//! scanned the LRU before the event was inserted.
//!
//! Every admission also claims the event hash in an in-flight set for the
//! duration of its check and process calls. A second copy arriving while
//! the first is in flight, complete or not, is dropped as
//! `AlreadyConnected`, so the processor sees each event at most once.

use crate::config::BufferLimit;
use crate::domain::incomplete::{BufferedEvent, IncompleteEvents};
use crate::metrics::OrderingMetrics;
use crate::ports::outbound::OrderingCallbacks;
use dg_01_event_checks::EventCheckError;
use parking_lot::Mutex;
use shared_types::{short_hash, Event, EventHeader, Hash, PeerId};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// Buffer of parent-incomplete events.
pub struct EventsBuffer {
    incompletes: Mutex<IncompleteEvents>,
    in_flight: Mutex<HashSet<Hash>>,
    callbacks: OrderingCallbacks,
    metrics: Option<OrderingMetrics>,
}

impl EventsBuffer {
    pub fn new(limit: BufferLimit, callbacks: OrderingCallbacks) -> Self {
        Self {
            incompletes: Mutex::new(IncompleteEvents::new(limit)),
            in_flight: Mutex::new(HashSet::new()),
            callbacks,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: OrderingMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Push an event received from `peer`.
    ///
    /// Returns `true` once the event is terminal (processed or dropped) and
    /// `false` if it is waiting in the buffer.
    pub fn push_event(&self, event: Arc<Event>, peer: PeerId) -> bool {
        let item = BufferedEvent::new(event, peer);

        if self.callbacks.store.exists(&item.hash) {
            self.release(&item, EventCheckError::AlreadyConnected);
            return true;
        }

        let parents = match self.resolve(&item) {
            Some(parents) => parents,
            None => {
                self.buffer(item.clone());
                match self.resolve(&item) {
                    Some(parents) if self.claim(&item.hash) => parents,
                    _ => return false,
                }
            }
        };

        self.connect(item, parents);
        true
    }

    /// Whether `hash` is waiting in the buffer.
    pub fn is_buffered(&self, hash: &Hash) -> bool {
        self.incompletes.lock().contains(hash)
    }

    /// Forget every buffered event without notifying anyone.
    pub fn clear(&self) {
        self.incompletes.lock().clear();
        self.update_gauge(0);
    }

    /// Number of buffered events.
    pub fn len(&self) -> usize {
        self.incompletes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.incompletes.lock().is_empty()
    }

    /// Total encoded size of buffered events.
    pub fn total_size(&self) -> usize {
        self.incompletes.lock().total_bytes()
    }

    /// Headers of every parent, or `None` if any is not connected yet.
    fn resolve(&self, item: &BufferedEvent) -> Option<Vec<EventHeader>> {
        {
            let mut incompletes = self.incompletes.lock();
            for parent in &item.event.parents {
                incompletes.touch(parent);
            }
        }
        item.event
            .parents
            .iter()
            .map(|parent| self.callbacks.store.get(parent))
            .collect()
    }

    fn buffer(&self, item: BufferedEvent) {
        let hash = item.hash;
        let (evicted, len) = {
            let mut incompletes = self.incompletes.lock();
            let evicted = incompletes.insert(item);
            (evicted, incompletes.len())
        };
        self.update_gauge(len);
        debug!(event = %short_hash(&hash), buffered = len, "Buffered event with missing parents");

        for spilled in evicted {
            debug!(event = %short_hash(&spilled.hash), peer = %spilled.peer, "Evicted buffered event");
            if let Some(metrics) = &self.metrics {
                metrics.record_evicted();
            }
            if let Some(hook) = &self.callbacks.evicted {
                hook.on_evicted(&spilled.event, &spilled.peer);
            }
        }
    }

    /// Take ownership of a buffered event. Only the caller that removes it
    /// may connect it.
    fn claim(&self, hash: &Hash) -> bool {
        let (claimed, len) = {
            let mut incompletes = self.incompletes.lock();
            let claimed = incompletes.remove(hash).is_some();
            (claimed, incompletes.len())
        };
        self.update_gauge(len);
        claimed
    }

    /// Connect `first`, then every buffered descendant it completes.
    fn connect(&self, first: BufferedEvent, parents: Vec<EventHeader>) {
        let mut pending = vec![(first, parents)];

        while let Some((item, parents)) = pending.pop() {
            if !self.admit(&item, &parents) {
                continue;
            }

            // Scanned after processing so a child buffered concurrently is
            // either seen here or sees this event in its own re-resolve.
            let children = self.incompletes.lock().children_of(&item.hash);
            for child in &children {
                if let Some(parents) = self.resolve(child) {
                    if self.claim(&child.hash) {
                        pending.push((child.clone(), parents));
                    }
                }
            }
        }
    }

    /// Check and process one complete event. `true` if processed.
    fn admit(&self, item: &BufferedEvent, parents: &[EventHeader]) -> bool {
        let Some(_claim) = InFlight::claim(&self.in_flight, item.hash) else {
            self.release(item, EventCheckError::AlreadyConnected);
            return false;
        };
        if self.callbacks.store.exists(&item.hash) {
            self.release(item, EventCheckError::AlreadyConnected);
            return false;
        }

        if let Some(check) = &self.callbacks.check {
            if let Err(err) = check.check(&item.event, parents) {
                self.release(item, err);
                return false;
            }
        }

        if let Err(reason) = self.callbacks.processor.process(&item.event) {
            self.release(item, EventCheckError::Process(reason));
            return false;
        }

        let len = {
            let mut incompletes = self.incompletes.lock();
            incompletes.remove(&item.hash);
            incompletes.len()
        };
        self.update_gauge(len);
        if let Some(metrics) = &self.metrics {
            metrics.record_processed();
        }
        trace!(event = %short_hash(&item.hash), peer = %item.peer, "Connected event");
        true
    }

    /// Drop `item` with `err`.
    fn release(&self, item: &BufferedEvent, err: EventCheckError) {
        let len = {
            let mut incompletes = self.incompletes.lock();
            incompletes.remove(&item.hash);
            incompletes.len()
        };
        self.update_gauge(len);
        if let Some(metrics) = &self.metrics {
            metrics.record_dropped(&err);
        }
        self.callbacks.drops.on_dropped(&item.event, &item.peer, &err);
    }

    fn update_gauge(&self, len: usize) {
        if let Some(metrics) = &self.metrics {
            metrics.set_buffered(len);
        }
    }
}

/// Holds an event hash in the in-flight set until dropped.
struct InFlight<'a> {
    set: &'a Mutex<HashSet<Hash>>,
    hash: Hash,
}

impl<'a> InFlight<'a> {
    /// `None` if another admission already holds `hash`.
    fn claim(set: &'a Mutex<HashSet<Hash>>, hash: Hash) -> Option<Self> {
        set.lock().insert(hash).then_some(Self { set, hash })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set.lock().remove(&self.hash);
    }
}
