//! # DAG Telemetry
//!
//! Process-level observability for hosts embedding the admission pipeline.
//! Library crates only emit `tracing` events and register metrics into a
//! caller-supplied registry; this crate installs the subscriber and owns
//! that registry.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dag_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let telemetry = init_telemetry(TelemetryConfig::from_env())?;
//! let metrics = PipelineMetrics::register(telemetry.metrics().registry())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DAG_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `DAG_JSON_LOGS` | `false` | JSON formatted logs |
//! | `DAG_SERVICE_NAME` | `dag-admission` | Service name in logs and metrics |
//! | `DAG_METRICS_PORT` | `9100` | Port the host serves metrics on |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::MetricsHandle;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install the subscriber and create the metrics registry.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics = MetricsHandle::new(&config.service_name)?;
    init_logging(&config)?;

    tracing::info!(
        service = %config.service_name,
        metrics_port = config.metrics_port,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard { config, metrics })
}

/// Keeps telemetry state for the lifetime of the host.
pub struct TelemetryGuard {
    config: TelemetryConfig,
    metrics: MetricsHandle,
}

impl TelemetryGuard {
    pub fn metrics(&self) -> &MetricsHandle {
        &self.metrics
    }

    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.config.service_name, "Shutting down telemetry");
    }
}
