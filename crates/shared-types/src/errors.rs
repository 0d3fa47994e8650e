//! # Error Types
//!
//! Failures of the secp256k1 signing and recovery primitives.

use thiserror::Error;

/// Errors raised while parsing, producing or recovering a signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// Signature is not exactly 65 bytes (r ‖ s ‖ v).
    #[error("Invalid signature length: expected 65, got {0}")]
    InvalidLength(usize),

    /// r or s is not a valid scalar.
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Signature has high S value (EIP-2 malleability protection).
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28).
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature.
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// The signing key refused to sign the digest.
    #[error("Signing failed")]
    SigningFailed,
}
