//! # Escrow Preconditions
//!
//! Ordered checks run against a live record before any effect. The order
//! is part of the contract: a caller that is both unauthorized and holding
//! the wrong key is told about the party mismatch.

use crate::domain::{
    invariant_authorized_party, invariant_commitment_match, Asset, Escrow, EscrowError, KeyId,
    Operation,
};
use shared_types::Address;

/// Verify a swap is allowed.
///
/// 1. Caller must be the recipient.
/// 2. Presented key must be the one committed to at creation.
pub fn check_swap<T: Asset>(
    escrow: &Escrow<T>,
    caller: &Address,
    presented_key: &KeyId,
) -> Result<(), EscrowError> {
    if !invariant_authorized_party(&escrow.recipient(), caller) {
        return Err(EscrowError::MismatchedParty {
            operation: Operation::Swap,
            expected: escrow.recipient(),
            actual: *caller,
        });
    }

    if !invariant_commitment_match(&escrow.exchange_key(), presented_key) {
        return Err(EscrowError::MismatchedCommitment {
            expected: escrow.exchange_key(),
            presented: *presented_key,
        });
    }

    Ok(())
}

/// Verify a cancel is allowed: caller must be the sender.
pub fn check_cancel<T: Asset>(escrow: &Escrow<T>, caller: &Address) -> Result<(), EscrowError> {
    if !invariant_authorized_party(&escrow.sender(), caller) {
        return Err(EscrowError::MismatchedParty {
            operation: Operation::Cancel,
            expected: escrow.sender(),
            actual: *caller,
        });
    }
    Ok(())
}
