//! # Gas Accounting
//!
//! Gas power an event must declare, and the intrinsic gas floor of each
//! transaction it carries. All arithmetic saturates.

use crate::config::EventRules;
use shared_types::{Event, Transaction};

/// Base cost of a call or transfer.
pub const TX_GAS: u64 = 21_000;
/// Base cost of a contract creation.
pub const TX_GAS_CONTRACT_CREATION: u64 = 53_000;
/// Cost per zero byte of call data.
pub const TX_DATA_ZERO_GAS: u64 = 4;
/// Cost per non-zero byte of call data.
pub const TX_DATA_NON_ZERO_GAS: u64 = 16;

/// Gas power an event consumes:
/// `Σ tx.gas + parent_gas × excess_parents + extra_data_gas × |extra| + event_gas`.
pub fn calc_gas_power_used(event: &Event, rules: &EventRules) -> u64 {
    let tx_gas = event
        .transactions
        .iter()
        .fold(0u64, |acc, tx| acc.saturating_add(tx.gas));

    let excess_parents = event.parents.len().saturating_sub(rules.dag.max_free_parents) as u64;
    let parents_gas = rules.gas.parent_gas.saturating_mul(excess_parents);
    let extra_gas = rules.gas.extra_data_gas.saturating_mul(event.extra.len() as u64);

    tx_gas
        .saturating_add(parents_gas)
        .saturating_add(extra_gas)
        .saturating_add(rules.gas.event_gas)
}

/// Minimum gas a transaction must carry before execution starts.
pub fn intrinsic_gas(tx: &Transaction) -> u64 {
    let base = if tx.to.is_none() {
        TX_GAS_CONTRACT_CREATION
    } else {
        TX_GAS
    };

    let zero_bytes = tx.data.iter().filter(|b| **b == 0).count() as u64;
    let non_zero_bytes = tx.data.len() as u64 - zero_bytes;

    base.saturating_add(zero_bytes.saturating_mul(TX_DATA_ZERO_GAS))
        .saturating_add(non_zero_bytes.saturating_mul(TX_DATA_NON_ZERO_GAS))
}
