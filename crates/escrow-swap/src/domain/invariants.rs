//! # Domain Invariants
//!
//! Business rules the escrow engine enforces before any effect.

use super::entities::{Key, Locked};
use super::value_objects::KeyId;
use shared_types::Address;

/// Invariant: only the authorized party may act.
///
/// The recipient for swap, the sender for cancel.
pub fn invariant_authorized_party(authorized: &Address, caller: &Address) -> bool {
    authorized == caller
}

/// Invariant: presented key matches the forward commitment.
///
/// The record's `exchange_key` must equal the identity of the presented key.
pub fn invariant_commitment_match(exchange_key: &KeyId, presented: &KeyId) -> bool {
    exchange_key == presented
}

/// Invariant: a handle opens only with the key it was bound to at lock time.
pub fn invariant_handle_bound<U>(locked: &Locked<U>, key: &Key) -> bool {
    locked.key_id == key.id
}
