//! Configuration types for event ordering

use dg_01_event_checks::{EventRules, HeavyCheckConfig};
use serde::{Deserialize, Serialize};

/// Bounds on the incomplete-events buffer. Both must hold after an insert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferLimit {
    /// Maximum number of buffered events.
    pub max_events: usize,
    /// Maximum total encoded size of buffered events, in bytes.
    pub max_bytes: usize,
}

impl Default for BufferLimit {
    fn default() -> Self {
        Self {
            max_events: 3_000,
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Everything the admission pipeline needs to be built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub rules: EventRules,
    pub heavy: HeavyCheckConfig,
    pub buffer: BufferLimit,
}
