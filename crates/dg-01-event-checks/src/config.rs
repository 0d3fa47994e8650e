//! Configuration types for event checks

use serde::{Deserialize, Serialize};

/// Structural limits on DAG events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DagRules {
    /// Maximum number of parents per event.
    pub max_parents: usize,
    /// Parents an event may reference without paying `parent_gas`.
    pub max_free_parents: usize,
    /// Maximum length of `extra` in bytes.
    pub max_extra_data: usize,
    /// Maximum encoded event size in bytes.
    pub max_event_size: usize,
}

impl Default for DagRules {
    fn default() -> Self {
        Self {
            max_parents: 10,
            max_free_parents: 3,
            max_extra_data: 128,
            max_event_size: 512 * 1024,
        }
    }
}

/// Gas-power pricing of events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasRules {
    /// Flat cost of every event.
    pub event_gas: u64,
    /// Cost of each parent beyond `max_free_parents`.
    pub parent_gas: u64,
    /// Cost per byte of `extra`.
    pub extra_data_gas: u64,
    /// Upper bound on `gas_power_used`.
    pub max_gas_power_used: u64,
}

impl Default for GasRules {
    fn default() -> Self {
        Self {
            event_gas: 28_000,
            parent_gas: 2_400,
            extra_data_gas: 25,
            max_gas_power_used: 10_000_000,
        }
    }
}

/// Rules consulted by the basic checker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRules {
    pub dag: DagRules,
    pub gas: GasRules,
}

/// Heavy-check worker pool settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeavyCheckConfig {
    /// Worker threads (default: num_cpus - 1, at least 1)
    pub threads: usize,
    /// Capacity of the task queue, in batches.
    pub max_queued_tasks: usize,
}

impl Default for HeavyCheckConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get().saturating_sub(1).max(1),
            max_queued_tasks: crate::pool::MAX_QUEUED_TASKS,
        }
    }
}

impl HeavyCheckConfig {
    /// Worker count actually spawned.
    pub fn effective_threads(&self) -> usize {
        self.threads.max(1)
    }

    /// Queue capacity actually used.
    pub fn effective_capacity(&self) -> usize {
        self.max_queued_tasks.max(1)
    }
}
