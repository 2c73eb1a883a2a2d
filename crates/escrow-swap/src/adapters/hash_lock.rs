//! Hash-Lock Commitment Adapter
//!
//! Implements `CommitmentPrimitive` with SHA-256 derived key identities.

use crate::algorithms::{derive_key_id, derive_locked_id, generate_salt, verify_binding};
use crate::domain::{Asset, Key, Locked, UnlockError};
use crate::ports::outbound::CommitmentPrimitive;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Commitment primitive keyed by asset content.
///
/// A key's identity covers the asset's id and digest plus a per-instance
/// salt and a lock counter. Mutating an asset and re-locking it can never
/// reproduce the key id it had before.
pub struct HashLockCommitment {
    salt: [u8; 32],
    nonce: AtomicU64,
}

impl HashLockCommitment {
    /// Create a primitive with a random salt.
    pub fn new() -> Self {
        Self::with_salt(generate_salt())
    }

    /// Create a primitive with a fixed salt.
    pub fn with_salt(salt: [u8; 32]) -> Self {
        Self {
            salt,
            nonce: AtomicU64::new(0),
        }
    }

    /// Number of locks performed.
    pub fn locks_issued(&self) -> u64 {
        self.nonce.load(Ordering::Relaxed)
    }
}

impl Default for HashLockCommitment {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitmentPrimitive for HashLockCommitment {
    fn lock<U: Asset>(&self, asset: U) -> (Locked<U>, Key) {
        let nonce = self.nonce.fetch_add(1, Ordering::Relaxed);
        let key_id = derive_key_id(&asset.id(), &asset.digest(), &self.salt, nonce);
        let id = derive_locked_id(&key_id);

        debug!(
            "[escrow] Locked item {} under key {}",
            asset.id().short(),
            key_id.short()
        );

        (Locked { id, key_id, asset }, Key { id: key_id })
    }

    fn unlock<U: Asset>(&self, locked: Locked<U>, key: Key) -> Result<U, UnlockError<U>> {
        if let Err(error) = verify_binding(&locked, &key) {
            debug!("[escrow] Refused unlock of handle {}", locked.id.short());
            return Err(UnlockError { error, locked, key });
        }

        debug!("[escrow] Unlocked handle {}", locked.id.short());
        Ok(locked.asset)
    }
}
