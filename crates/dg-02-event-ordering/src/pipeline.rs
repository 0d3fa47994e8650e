//! # Admission Pipeline
//!
//! Wires the DG-01 checkers, the heavy-check pool and the [`EventsBuffer`]
//! into two entry points.
//!
//! ## Peer Events
//!
//! ```text
//! ingest_from_peer ─► known / buffered? ─► basic + epoch ─► heavy pool ─► buffer
//!                          │                     │              │           │
//!                          └── drop ◄────────────┴──────────────┘    epoch + parents
//! ```
//!
//! The epoch check runs before the pool so events from non-validators never
//! cost a signature recovery. It runs again in the buffer, since the epoch
//! may change while an event waits for parents.
//!
//! ## Local Events
//!
//! `ingest_local` runs the basic checks and pushes synchronously. The
//! heavy stage is skipped: the node signed the event itself.
//!
//! Every drop goes through the [`BanClassifier`] before reaching the host.

use crate::adapters::{BanClassifier, OrderedChecks};
use crate::buffer::EventsBuffer;
use crate::config::PipelineConfig;
use crate::metrics::PipelineMetrics;
use crate::ports::outbound::{
    DropSink, EventProcessor, EventStore, EvictionHook, OrderingCallbacks, PeerReporter,
};
use dg_01_event_checks::{
    EpochReader, EventCheckApi, EventCheckError, EventCheckService, HeavyCheckPool, TxSigner,
    ValidatedBatch,
};
use shared_types::{short_hash, Event, Hash, PeerId};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Host-side collaborators of the pipeline.
#[derive(Clone)]
pub struct PipelineHost {
    pub store: Arc<dyn EventStore>,
    pub processor: Arc<dyn EventProcessor>,
    pub drops: Arc<dyn DropSink>,
    pub reporter: Arc<dyn PeerReporter>,
    pub evicted: Option<Arc<dyn EvictionHook>>,
}

pub struct AdmissionPipeline {
    checks: Arc<EventCheckService>,
    pool: HeavyCheckPool,
    buffer: Arc<EventsBuffer>,
    store: Arc<dyn EventStore>,
    drops: Arc<dyn DropSink>,
}

impl AdmissionPipeline {
    pub fn new(
        config: PipelineConfig,
        epoch_reader: Arc<dyn EpochReader>,
        tx_signer: Arc<dyn TxSigner>,
        host: PipelineHost,
        metrics: Option<PipelineMetrics>,
    ) -> Self {
        let mut service = EventCheckService::new(config.rules, epoch_reader, tx_signer);
        if let Some(metrics) = &metrics {
            service = service.with_metrics(metrics.checks.clone());
        }
        let checks = Arc::new(service);

        let mut pool = HeavyCheckPool::new(checks.heavy(), config.heavy);
        if let Some(metrics) = &metrics {
            pool = pool.with_metrics(metrics.checks.clone());
        }

        let drops: Arc<dyn DropSink> = Arc::new(BanClassifier::new(host.drops, host.reporter));
        let callbacks = OrderingCallbacks {
            store: Arc::clone(&host.store),
            processor: host.processor,
            drops: Arc::clone(&drops),
            check: Some(Arc::new(OrderedChecks::new(
                Arc::clone(&checks) as Arc<dyn EventCheckApi>
            ))),
            evicted: host.evicted,
        };
        let mut buffer = EventsBuffer::new(config.buffer, callbacks);
        if let Some(metrics) = metrics {
            buffer = buffer.with_metrics(metrics.ordering);
        }

        Self {
            checks,
            pool,
            buffer: Arc::new(buffer),
            store: host.store,
            drops,
        }
    }

    /// Start the heavy-check workers.
    pub fn start(&self) -> std::io::Result<()> {
        self.pool.start()?;
        info!(buffered = self.buffer.len(), "Admission pipeline started");
        Ok(())
    }

    /// Stop the workers. Batches still queued are abandoned.
    pub fn stop(&self) {
        self.pool.stop();
        info!(buffered = self.buffer.len(), "Admission pipeline stopped");
    }

    /// Admit a batch of events relayed by `peer`.
    ///
    /// Returns once every surviving event is queued for heavy checks;
    /// connection happens later on a worker thread. Blocks while the pool
    /// is full and returns `Terminated` if it is stopped meanwhile.
    ///
    /// On `Terminated`, events not yet queued are discarded without reaching
    /// the drop sink: shutdown is not the peer's fault, and the error is the
    /// caller's only signal. Batches queued before the stop are abandoned
    /// the same way.
    pub fn ingest_from_peer(&self, peer: PeerId, events: Vec<Event>) -> Result<(), EventCheckError> {
        let mut survivors = Vec::with_capacity(events.len());
        for event in events {
            let event = Arc::new(event);
            let hash = event.hash();

            if self.buffer.is_buffered(&hash) {
                trace!(event = %short_hash(&hash), %peer, "Skipping already buffered event");
                continue;
            }
            if self.store.exists(&hash) {
                self.drops
                    .on_dropped(&event, &peer, &EventCheckError::AlreadyConnected);
                continue;
            }
            if let Err(err) = self.checks.validate_light(&event) {
                self.drops.on_dropped(&event, &peer, &err);
                continue;
            }
            survivors.push(event);
        }

        if survivors.is_empty() {
            return Ok(());
        }
        debug!(%peer, events = survivors.len(), "Queueing events for heavy checks");

        let buffer = Arc::clone(&self.buffer);
        let drops = Arc::clone(&self.drops);
        self.pool.enqueue(survivors, move |batch: ValidatedBatch| {
            for (event, result) in batch.events.into_iter().zip(batch.results) {
                match result {
                    Ok(()) => {
                        buffer.push_event(event, peer);
                    }
                    Err(err) => drops.on_dropped(&event, &peer, &err),
                }
            }
        })
    }

    /// Admit an event authored by this node.
    ///
    /// Returns `Ok(true)` once the event is processed or dropped by the
    /// ordered checks, `Ok(false)` if it waits for parents, and the basic
    /// check error otherwise.
    pub fn ingest_local(&self, event: Event) -> Result<bool, EventCheckError> {
        self.checks.validate_basic(&event)?;
        Ok(self.buffer.push_event(Arc::new(event), PeerId::LOCAL))
    }

    /// More than half the heavy-check queue is in use.
    pub fn overloaded(&self) -> bool {
        self.pool.overloaded()
    }

    pub fn is_buffered(&self, hash: &Hash) -> bool {
        self.buffer.is_buffered(hash)
    }

    pub fn buffer(&self) -> &EventsBuffer {
        &self.buffer
    }

    /// Forget buffered events, e.g. on epoch change.
    pub fn clear(&self) {
        self.buffer.clear();
    }
}
