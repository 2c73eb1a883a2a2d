//! # Assets
//!
//! What can be escrowed or locked.

use super::errors::AssetError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_types::{Hash, ObjectId};

/// An ownable object.
///
/// `id` is the object's identity and never changes. `digest` covers the
/// object's content, so any mutation yields a different digest.
pub trait Asset: Send + Sync + 'static {
    /// The object's own identity.
    fn id(&self) -> ObjectId;

    /// Digest of the object's current content.
    fn digest(&self) -> Hash;
}

/// A fungible balance object.
///
/// Deliberately not `Clone`: a coin exists in exactly one place.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    id: ObjectId,
    value: u64,
}

impl Coin {
    /// Mint a coin with a fresh id.
    pub fn mint(value: u64) -> Self {
        Self {
            id: ObjectId::fresh(),
            value,
        }
    }

    /// Current value.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Take `amount` out of this coin into a new coin.
    ///
    /// The original keeps its id but its content (and digest) changes.
    pub fn split(&mut self, amount: u64) -> Result<Coin, AssetError> {
        if amount == 0 {
            return Err(AssetError::ZeroAmount);
        }
        if amount > self.value {
            return Err(AssetError::InsufficientValue {
                requested: amount,
                available: self.value,
            });
        }
        self.value -= amount;
        Ok(Coin::mint(amount))
    }

    /// Merge another coin into this one, destroying it.
    pub fn join(&mut self, other: Coin) -> Result<(), AssetError> {
        self.value = self
            .value
            .checked_add(other.value)
            .ok_or(AssetError::Overflow)?;
        Ok(())
    }
}

impl Asset for Coin {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn digest(&self) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(b"coin");
        hasher.update(self.id.as_bytes());
        hasher.update(self.value.to_le_bytes());
        hasher.finalize().into()
    }
}
