//! # Parents Checker
//!
//! Relational checks between an event and its resolved parents: Lamport
//! clock, parent uniqueness, self-parent placement, sequence continuity and
//! monotonic claimed time along the creator's own chain.

use super::errors::EventCheckError;
use shared_types::{Event, EventHeader};
use std::collections::HashSet;

/// Stateless parents checker.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParentsChecker;

impl ParentsChecker {
    pub fn new() -> Self {
        Self
    }

    /// Check `event` against `parents`, the headers of `event.parents` in
    /// declaration order.
    ///
    /// # Panics
    ///
    /// If `parents.len() != event.parents.len()`. Resolving every parent is
    /// the caller's job.
    pub fn validate(&self, event: &Event, parents: &[EventHeader]) -> Result<(), EventCheckError> {
        assert_eq!(
            event.parents.len(),
            parents.len(),
            "parents checker called with {} resolved headers for {} declared parents",
            parents.len(),
            event.parents.len()
        );

        let max_lamport = parents.iter().map(|p| p.lamport).max().unwrap_or(0);
        let expected = max_lamport.saturating_add(1);
        if event.lamport != expected {
            return Err(EventCheckError::WrongLamport {
                declared: event.lamport,
                expected,
            });
        }

        let unique: HashSet<_> = event.parents.iter().collect();
        if unique.len() != event.parents.len() {
            return Err(EventCheckError::DoubleParents);
        }

        for (declared, parent) in event.parents.iter().zip(parents) {
            if (parent.creator == event.creator) != event.is_self_parent(declared) {
                return Err(EventCheckError::WrongSelfParent);
            }
        }

        if (event.seq <= 1) != event.self_parent().is_none() {
            return Err(EventCheckError::WrongSeq);
        }

        if event.self_parent().is_some() {
            let self_parent = &parents[0];
            if !event.is_self_parent(&self_parent.hash) {
                return Err(EventCheckError::WrongSelfParent);
            }
            if event.seq != self_parent.seq.saturating_add(1) {
                return Err(EventCheckError::WrongSeq);
            }
            if event.claimed_time <= self_parent.claimed_time {
                return Err(EventCheckError::PastTime);
            }
        }

        Ok(())
    }
}
