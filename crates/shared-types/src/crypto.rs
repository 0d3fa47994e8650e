//! # secp256k1 Primitives
//!
//! keccak-256 hashing, signing over a prehashed digest and signer recovery.
//! Signatures are 65 bytes, `r ‖ s ‖ v`, with `v` accepted as 0/1 or 27/28.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: high-S signatures are rejected on
//!   recovery and never produced by [`sign_hash`].
//! - **Scalar Range Validation**: r and s must be in [1, n-1]; enforced by
//!   `Signature::from_slice`.

use crate::entities::{Address, Hash};
use crate::errors::SignatureError;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use sha3::{Digest, Keccak256};

/// Length of a recoverable signature.
pub const SIGNATURE_LEN: usize = 65;

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive the Ethereum-style address of a public key.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let pubkey_bytes = public_key.to_encoded_point(false);

    // Keccak256 of the uncompressed key without the 0x04 prefix
    let hash = keccak256(&pubkey_bytes.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Recover the signer's address from a 65-byte signature over `message_hash`.
pub fn recover_address(message_hash: &Hash, signature: &[u8]) -> Result<Address, SignatureError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(SignatureError::InvalidLength(signature.len()));
    }

    let recovery_id = parse_recovery_id(signature[64])?;
    let sig =
        Signature::from_slice(&signature[..64]).map_err(|_| SignatureError::InvalidFormat)?;

    if sig.normalize_s().is_some() {
        return Err(SignatureError::MalleableSignature);
    }

    let recovered_key = VerifyingKey::recover_from_prehash(message_hash, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    Ok(address_from_pubkey(&recovered_key))
}

/// Sign a prehashed digest, producing a low-S `r ‖ s ‖ v` signature with `v ∈ {0, 1}`.
pub fn sign_hash(key: &SigningKey, message_hash: &Hash) -> Result<[u8; SIGNATURE_LEN], SignatureError> {
    let (mut signature, mut recovery_id) = key
        .sign_prehash_recoverable(message_hash)
        .map_err(|_| SignatureError::SigningFailed)?;

    if let Some(normalized) = signature.normalize_s() {
        signature = normalized;
        recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
    }

    let mut out = [0u8; SIGNATURE_LEN];
    out[..64].copy_from_slice(&signature.to_bytes());
    out[64] = recovery_id.to_byte();
    Ok(out)
}

/// Parse recovery ID from v value (0, 1, 27 or 28).
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let normalized = match v {
        0 | 1 => v,
        27 | 28 => v - 27,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };
    RecoveryId::from_byte(normalized).ok_or(SignatureError::InvalidRecoveryId(v))
}
