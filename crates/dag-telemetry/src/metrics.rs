//! Prometheus registry ownership and text exposition.
//!
//! Pipeline crates register their metrics into [`MetricsHandle::registry`];
//! every series gets a constant `service` label.

use crate::TelemetryError;
use prometheus::{Encoder, Registry, TextEncoder};
use std::collections::HashMap;
use std::sync::Arc;

/// Shared handle to the process registry.
#[derive(Clone)]
pub struct MetricsHandle {
    registry: Arc<Registry>,
}

impl MetricsHandle {
    pub fn new(service_name: &str) -> Result<Self, TelemetryError> {
        let labels = HashMap::from([("service".to_string(), service_name.to_string())]);
        let registry = Registry::new_custom(None, Some(labels))
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
        Ok(Self {
            registry: Arc::new(registry),
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encode all metrics as Prometheus text format.
    pub fn gather_text(&self) -> Result<String, TelemetryError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
    }
}
