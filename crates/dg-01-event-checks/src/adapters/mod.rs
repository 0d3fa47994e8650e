//! Adapters: concrete implementations of the outbound ports.

pub mod epoch;
pub mod signer;

pub use epoch::StaticEpochReader;
pub use signer::EcdsaTxSigner;
