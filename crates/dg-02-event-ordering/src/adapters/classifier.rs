//! # Ban Classifier
//!
//! [`DropSink`] decorator that reports the relaying peer when a drop is
//! ban-worthy. Self-authored events are never reported.

use crate::ports::outbound::{DropSink, PeerReporter};
use dg_01_event_checks::{is_ban, EventCheckError};
use shared_types::{short_hash, Event, PeerId};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct BanClassifier {
    inner: Arc<dyn DropSink>,
    reporter: Arc<dyn PeerReporter>,
}

impl BanClassifier {
    pub fn new(inner: Arc<dyn DropSink>, reporter: Arc<dyn PeerReporter>) -> Self {
        Self { inner, reporter }
    }
}

impl DropSink for BanClassifier {
    fn on_dropped(&self, event: &Arc<Event>, peer: &PeerId, err: &EventCheckError) {
        let hash = event.hash();
        if is_ban(Some(err)) && !peer.is_local() {
            warn!(
                event = %short_hash(&hash),
                %peer,
                kind = err.kind(),
                error = %err,
                "Dropped ban-worthy event"
            );
            self.reporter.misbehaved(peer, err);
        } else {
            debug!(event = %short_hash(&hash), %peer, kind = err.kind(), "Dropped event");
        }
        self.inner.on_dropped(event, peer, err);
    }
}
