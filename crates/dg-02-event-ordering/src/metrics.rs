//! # Ordering Metrics
//!
//! ## Metrics Exported
//!
//! - `dag_events_buffered` - Events currently waiting for parents
//! - `dag_events_processed_total` - Events connected to the DAG
//! - `dag_events_dropped_total{kind}` - Events dropped, by error kind
//! - `dag_events_evicted_total` - Buffered events spilled by the LRU bounds

use dg_01_event_checks::{CheckMetrics, EventCheckError};
use prometheus::{IntCounter, IntCounterVec, IntGauge, Opts, Registry};

/// Metric handles for the reorder buffer.
#[derive(Clone)]
pub struct OrderingMetrics {
    buffered: IntGauge,
    processed: IntCounter,
    dropped: IntCounterVec,
    evicted: IntCounter,
}

impl OrderingMetrics {
    pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
        let buffered = IntGauge::new("dag_events_buffered", "Events waiting for parents")?;
        let processed = IntCounter::new(
            "dag_events_processed_total",
            "Events connected to the DAG",
        )?;
        let dropped = IntCounterVec::new(
            Opts::new("dag_events_dropped_total", "Events dropped by error kind"),
            &["kind"],
        )?;
        let evicted = IntCounter::new(
            "dag_events_evicted_total",
            "Buffered events spilled by the LRU bounds",
        )?;

        registry.register(Box::new(buffered.clone()))?;
        registry.register(Box::new(processed.clone()))?;
        registry.register(Box::new(dropped.clone()))?;
        registry.register(Box::new(evicted.clone()))?;

        Ok(Self {
            buffered,
            processed,
            dropped,
            evicted,
        })
    }

    pub fn set_buffered(&self, len: usize) {
        self.buffered.set(len as i64);
    }

    pub fn record_processed(&self) {
        self.processed.inc();
    }

    pub fn record_dropped(&self, err: &EventCheckError) {
        self.dropped.with_label_values(&[err.kind()]).inc();
    }

    pub fn record_evicted(&self) {
        self.evicted.inc();
    }
}

/// Check and ordering metrics registered together for a pipeline.
#[derive(Clone)]
pub struct PipelineMetrics {
    pub checks: CheckMetrics,
    pub ordering: OrderingMetrics,
}

impl PipelineMetrics {
    pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
        Ok(Self {
            checks: CheckMetrics::register(registry)?,
            ordering: OrderingMetrics::register(registry)?,
        })
    }
}
