//! # Ban Classifier
//!
//! Maps a check outcome to "penalise the relaying peer or not". Events from
//! another epoch and duplicates are expected during normal gossip; anything
//! else means the peer relayed an event it should have rejected itself.

use super::errors::EventCheckError;

/// `false` for success, `NotRelevant` and `AlreadyConnected`; `true` otherwise.
pub fn is_ban(err: Option<&EventCheckError>) -> bool {
    err.is_some_and(EventCheckError::is_ban)
}
