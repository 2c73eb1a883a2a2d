//! # Key Derivation and Verification
//!
//! Content-derived key identities for the commitment primitive.

use crate::domain::{invariant_handle_bound, CommitmentError, Key, KeyId, Locked};
use rand::RngCore;
use shared_types::{Hash, ObjectId};

/// Domain tag for key identities.
pub const KEY_DOMAIN: &[u8] = b"escrow-swap/key";

/// Domain tag for locked-handle identities.
pub const LOCKED_DOMAIN: &[u8] = b"escrow-swap/locked";

/// Generate a random per-instance salt.
pub fn generate_salt() -> [u8; 32] {
    let mut salt = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Derive the identity of a fresh key.
///
/// Covers the asset's id and content digest plus a per-lock nonce, so
/// re-locking a modified asset can never reproduce an earlier key id.
pub fn derive_key_id(item_id: &ObjectId, digest: &Hash, salt: &[u8; 32], nonce: u64) -> KeyId {
    ObjectId::derive(
        KEY_DOMAIN,
        &[item_id.as_bytes(), digest, salt, &nonce.to_le_bytes()],
    )
}

/// Derive the id of the handle bound to `key_id`.
pub fn derive_locked_id(key_id: &KeyId) -> ObjectId {
    ObjectId::derive(LOCKED_DOMAIN, &[key_id.as_bytes()])
}

/// Verify that `key` opens `locked`.
pub fn verify_binding<U>(locked: &Locked<U>, key: &Key) -> Result<(), CommitmentError> {
    if !invariant_handle_bound(locked, key) {
        return Err(CommitmentError::KeyMismatch {
            handle_key: locked.key_id,
            presented: key.id,
        });
    }
    Ok(())
}
