//! Bridges the DG-01 ordered checks into the buffer's [`EventCheck`] port.

use crate::ports::outbound::EventCheck;
use dg_01_event_checks::{EventCheckApi, EventCheckError};
use shared_types::{Event, EventHeader};
use std::sync::Arc;

/// Runs epoch and parents checks once parents are resolved.
pub struct OrderedChecks {
    api: Arc<dyn EventCheckApi>,
}

impl OrderedChecks {
    pub fn new(api: Arc<dyn EventCheckApi>) -> Self {
        Self { api }
    }
}

impl EventCheck for OrderedChecks {
    fn check(&self, event: &Event, parents: &[EventHeader]) -> Result<(), EventCheckError> {
        self.api.validate_ordered(event, parents)
    }
}
