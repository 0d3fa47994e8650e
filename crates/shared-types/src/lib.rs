//! # Shared Types Crate
//!
//! Types shared by every stage of event admission: the DAG [`Event`] and its
//! resolved-parent projection [`EventHeader`], gossiped [`Transaction`]s, the
//! epoch [`ValidatorSet`] and peer identities.
//!
//! ## Identity
//!
//! - An event's identity is `keccak256(bincode(event))`.
//! - An event's author is the address recovered from its 65-byte secp256k1
//!   signature over [`Event::signing_hash`].
//! - `tx_hash` commits to the transaction list through a binary Merkle root
//!   ([`merkle_root`]).

pub mod crypto;
pub mod entities;
pub mod errors;
pub mod event;
pub mod merkle;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;
pub mod transaction;
pub mod validators;

pub use crypto::{address_from_pubkey, keccak256, recover_address, sign_hash, SIGNATURE_LEN};
pub use entities::*;
pub use errors::SignatureError;
pub use event::{Event, EventHeader, EVENT_VERSION};
pub use merkle::{merkle_root, SENTINEL_HASH};
pub use transaction::{SenderCache, Transaction};
pub use validators::ValidatorSet;

/// Re-export of the secp256k1 key types used to sign events and transactions.
pub use k256::ecdsa::{SigningKey, VerifyingKey};
