//! # Basic Checker
//!
//! Context-free checks: everything that can be decided from the event alone.
//! Cheap enough to run on the gossip receive path before anything is queued.

use super::errors::EventCheckError;
use super::gas::{calc_gas_power_used, intrinsic_gas};
use crate::config::EventRules;
use crate::ports::inbound::EventValidator;
use shared_types::{Event, Transaction, EVENT_VERSION, SIGNATURE_LEN};

/// Counters at or above this are rejected so `+1` arithmetic never overflows.
pub const MAX_DAG_VALUE: u32 = (i32::MAX / 2) as u32;
/// Gas fields at or above this are rejected.
pub const MAX_GAS_VALUE: u64 = (i64::MAX / 2) as u64;

/// Stateless structural and gas-accounting checks.
#[derive(Debug, Clone, Default)]
pub struct BasicChecker {
    rules: EventRules,
}

impl BasicChecker {
    pub fn new(rules: EventRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &EventRules {
        &self.rules
    }

    /// Run every basic check, returning the first failure.
    pub fn validate(&self, event: &Event) -> Result<(), EventCheckError> {
        if event.version != EVENT_VERSION {
            return Err(EventCheckError::Version(event.version));
        }
        self.check_limits(event)?;
        check_inited(event)?;
        self.check_gas(event)?;
        for (index, tx) in event.transactions.iter().enumerate() {
            check_tx(index, tx)?;
        }
        Ok(())
    }

    fn check_limits(&self, event: &Event) -> Result<(), EventCheckError> {
        let dag = &self.rules.dag;

        let size = event.encoded_size();
        if size > dag.max_event_size {
            return Err(EventCheckError::TooLarge {
                size,
                max: dag.max_event_size,
            });
        }
        if event.extra.len() > dag.max_extra_data {
            return Err(EventCheckError::ExtraTooLarge {
                size: event.extra.len(),
                max: dag.max_extra_data,
            });
        }
        if event.parents.len() > dag.max_parents {
            return Err(EventCheckError::TooManyParents {
                count: event.parents.len(),
                max: dag.max_parents,
            });
        }

        let counters = [
            ("seq", event.seq),
            ("epoch", event.epoch),
            ("frame", event.frame),
            ("lamport", event.lamport),
        ];
        if let Some(&(field, _)) = counters.iter().find(|(_, v)| *v >= MAX_DAG_VALUE) {
            return Err(EventCheckError::HugeValue { field });
        }

        let gas = [
            ("gas_power_used", event.gas_power_used),
            ("gas_power_left", event.gas_power_left),
        ];
        if let Some(&(field, _)) = gas.iter().find(|(_, v)| *v >= MAX_GAS_VALUE) {
            return Err(EventCheckError::HugeValue { field });
        }

        Ok(())
    }

    fn check_gas(&self, event: &Event) -> Result<(), EventCheckError> {
        let max = self.rules.gas.max_gas_power_used;
        if event.gas_power_used > max {
            return Err(EventCheckError::TooBigGasUsed {
                used: event.gas_power_used,
                max,
            });
        }

        let calculated = calc_gas_power_used(event, &self.rules);
        if event.gas_power_used != calculated {
            return Err(EventCheckError::WrongGasUsed {
                declared: event.gas_power_used,
                calculated,
            });
        }
        Ok(())
    }
}

fn check_inited(event: &Event) -> Result<(), EventCheckError> {
    let counters = [
        ("seq", event.seq),
        ("epoch", event.epoch),
        ("frame", event.frame),
        ("lamport", event.lamport),
    ];
    if let Some(&(field, _)) = counters.iter().find(|(_, v)| *v == 0) {
        return Err(EventCheckError::NotInited { field });
    }
    if event.claimed_time == 0 {
        return Err(EventCheckError::ZeroTime);
    }
    if event.seq > 1 && event.parents.is_empty() {
        return Err(EventCheckError::NoParents);
    }
    if event.sig.len() != SIGNATURE_LEN {
        return Err(EventCheckError::SigMalformed(event.sig.len()));
    }
    Ok(())
}

fn check_tx(index: usize, tx: &Transaction) -> Result<(), EventCheckError> {
    if tx.value < 0 || tx.gas_price < 0 {
        return Err(EventCheckError::NegativeValue { index });
    }
    let intrinsic = intrinsic_gas(tx);
    if tx.gas < intrinsic {
        return Err(EventCheckError::IntrinsicGas {
            index,
            gas: tx.gas,
            intrinsic,
        });
    }
    Ok(())
}

impl EventValidator for BasicChecker {
    fn validate(&self, event: &Event) -> Result<(), EventCheckError> {
        BasicChecker::validate(self, event)
    }
}
