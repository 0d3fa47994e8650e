//! # Check Metrics
//!
//! Prometheus metrics for event checks, registered into a caller-supplied
//! registry.
//!
//! ## Metrics Exported
//!
//! - `dag_events_checked_total{result}` - Events run through a check stage
//! - `dag_event_check_failures_total{kind}` - Failed checks by error kind
//! - `dag_heavy_batch_seconds` - Heavy-check time per batch
//! - `dag_heavy_queue_depth` - Batches waiting in the heavy-check queue

use crate::domain::errors::EventCheckError;
use prometheus::{Histogram, HistogramOpts, IntCounterVec, IntGauge, Opts, Registry};

/// Metric handles for the check stages.
#[derive(Clone)]
pub struct CheckMetrics {
    checked: IntCounterVec,
    failures: IntCounterVec,
    heavy_batch_seconds: Histogram,
    heavy_queue_depth: IntGauge,
}

impl CheckMetrics {
    /// Create the metrics and register them with `registry`.
    pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
        let checked = IntCounterVec::new(
            Opts::new("dag_events_checked_total", "Events run through a check stage"),
            &["result"],
        )?;
        let failures = IntCounterVec::new(
            Opts::new("dag_event_check_failures_total", "Failed event checks by kind"),
            &["kind"],
        )?;
        let heavy_batch_seconds = Histogram::with_opts(
            HistogramOpts::new("dag_heavy_batch_seconds", "Heavy-check time per batch")
                .buckets(vec![0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25]),
        )?;
        let heavy_queue_depth = IntGauge::new(
            "dag_heavy_queue_depth",
            "Batches waiting in the heavy-check queue",
        )?;

        registry.register(Box::new(checked.clone()))?;
        registry.register(Box::new(failures.clone()))?;
        registry.register(Box::new(heavy_batch_seconds.clone()))?;
        registry.register(Box::new(heavy_queue_depth.clone()))?;

        Ok(Self {
            checked,
            failures,
            heavy_batch_seconds,
            heavy_queue_depth,
        })
    }

    /// Record the outcome of one event check.
    pub fn record(&self, result: &Result<(), EventCheckError>) {
        match result {
            Ok(()) => self.checked.with_label_values(&["ok"]).inc(),
            Err(err) => {
                self.checked.with_label_values(&["failed"]).inc();
                self.failures.with_label_values(&[err.kind()]).inc();
            }
        }
    }

    pub fn observe_batch(&self, seconds: f64) {
        self.heavy_batch_seconds.observe(seconds);
    }

    pub fn set_queue_depth(&self, depth: usize) {
        self.heavy_queue_depth.set(depth as i64);
    }
}
