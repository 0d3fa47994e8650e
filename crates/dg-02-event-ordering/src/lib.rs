//! # Event Ordering Subsystem (DG-02)
//!
//! Events arrive by gossip in any order, but the DAG only accepts an event
//! once every parent is connected. This crate holds parent-incomplete
//! events and releases them parent-first.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): the bounded LRU of incomplete events
//! - **Ports Layer** (`ports/`): host callbacks (store lookups, processing,
//!   drop / eviction notifications, peer penalties)
//! - **Buffer** (`buffer.rs`): [`EventsBuffer`], the reorder algorithm
//! - **Pipeline** (`pipeline.rs`): [`AdmissionPipeline`], gossip and local
//!   entry points wiring DG-01 checks, the heavy-check pool and the buffer
//! - **Adapters** (`adapters/`): in-memory DAG, check and classifier bridges
//!
//! ## Release Order
//!
//! Pushing C, B, A where C → B → A (child → parent) releases A, B, C: A
//! completes immediately, and each connection re-examines buffered events
//! that name the connected hash as a parent.

pub mod adapters;
pub mod buffer;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod pipeline;
pub mod ports;

pub use adapters::{BanClassifier, InMemoryDag, OrderedChecks};
pub use buffer::EventsBuffer;
pub use config::{BufferLimit, PipelineConfig};
pub use domain::incomplete::{BufferedEvent, IncompleteEvents};
pub use metrics::{OrderingMetrics, PipelineMetrics};
pub use pipeline::{AdmissionPipeline, PipelineHost};
pub use ports::outbound::{
    DropSink, EventCheck, EventProcessor, EventStore, EvictionHook, OrderingCallbacks,
    PeerReporter,
};
