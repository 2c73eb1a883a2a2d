//! # Domain Errors
//!
//! Every rejection is a hard stop: the operation has no effect at all.

use super::entities::{Key, Locked};
use super::value_objects::{KeyId, Operation};
use shared_types::{Address, ObjectId};
use thiserror::Error;

/// Escrow engine error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscrowError {
    /// Caller is not the party authorized for this operation.
    #[error("Mismatched party for {operation}: expected {expected}, got {actual}")]
    MismatchedParty {
        /// Operation that was attempted.
        operation: Operation,
        /// The authorized party (recipient for swap, sender for cancel).
        expected: Address,
        /// The caller.
        actual: Address,
    },

    /// Presented key is not the one promised at creation.
    #[error("Mismatched commitment: expected key {expected}, presented {presented}")]
    MismatchedCommitment {
        /// The record's `exchange_key`.
        expected: KeyId,
        /// Identity of the presented key.
        presented: KeyId,
    },

    /// No live record with this id (never existed or already consumed).
    #[error("Escrow not found: {0}")]
    RecordNotFound(ObjectId),

    /// The commitment primitive refused the handle/key pair.
    #[error("Commitment error: {0}")]
    Commitment(#[from] CommitmentError),
}

/// Commitment primitive error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitmentError {
    /// The handle was bound to a different key at lock time.
    #[error("Key mismatch: handle bound to {handle_key}, presented {presented}")]
    KeyMismatch {
        /// Key id recorded in the handle.
        handle_key: KeyId,
        /// Key id presented.
        presented: KeyId,
    },
}

/// Asset manipulation error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// Split amount must be non-zero.
    #[error("Amount must be non-zero")]
    ZeroAmount,

    /// Not enough value to split off the requested amount.
    #[error("Insufficient value: requested {requested}, available {available}")]
    InsufficientValue {
        /// Requested amount.
        requested: u64,
        /// Value held.
        available: u64,
    },

    /// Joining would overflow the value.
    #[error("Value overflow")]
    Overflow,
}

/// A failed `unlock`, handing the handle and key back untouched.
#[derive(Debug)]
pub struct UnlockError<U> {
    /// Why the unlock was refused.
    pub error: CommitmentError,
    /// The handle, still locked.
    pub locked: Locked<U>,
    /// The key, still unspent.
    pub key: Key,
}

/// A rejected swap.
///
/// The key and handle are returned to the caller so a rejection never
/// consumes them.
#[derive(Debug)]
pub struct SwapRejected<U> {
    /// Why the swap was rejected.
    pub error: EscrowError,
    /// The presented key, unspent.
    pub key: Key,
    /// The presented handle, still locked.
    pub locked: Locked<U>,
}

impl<U> SwapRejected<U> {
    /// Split into the error and the returned inputs.
    pub fn into_parts(self) -> (EscrowError, Key, Locked<U>) {
        (self.error, self.key, self.locked)
    }
}

impl<U> From<SwapRejected<U>> for EscrowError {
    fn from(rejected: SwapRejected<U>) -> Self {
        rejected.error
    }
}

impl<U> std::fmt::Display for SwapRejected<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Swap rejected: {}", self.error)
    }
}
