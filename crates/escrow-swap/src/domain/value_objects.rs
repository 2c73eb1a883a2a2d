//! # Domain Value Objects
//!
//! Immutable value types for the escrow engine.

use serde::{Deserialize, Serialize};
use shared_types::ObjectId;
use std::fmt;

/// Identity of a [`Key`](super::entities::Key).
///
/// Stored in an escrow record as a plain comparable value, so the record
/// never holds on to the key or the handle it unlocks.
pub type KeyId = ObjectId;

/// Operations the engine performs on a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Offer creation.
    Create,
    /// Recipient takes the offer.
    Swap,
    /// Sender reclaims the asset.
    Cancel,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Swap => "swap",
            Self::Cancel => "cancel",
        })
    }
}

/// Escrow record state machine.
///
/// `Active` is the only state in which a record exists. The two terminal
/// states are remembered only as tombstones once the record is gone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscrowStatus {
    /// Created, asset held, waiting for swap or cancel.
    #[default]
    Active,
    /// Consumed by a successful swap.
    Swapped,
    /// Consumed by the sender's cancel.
    Cancelled,
}

impl EscrowStatus {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: EscrowStatus) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Swapped) | (Self::Active, Self::Cancelled)
        )
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Swapped | Self::Cancelled)
    }

    /// The terminal state an operation leads to, if any.
    pub fn after(operation: Operation) -> Option<EscrowStatus> {
        match operation {
            Operation::Create => None,
            Operation::Swap => Some(Self::Swapped),
            Operation::Cancel => Some(Self::Cancelled),
        }
    }
}
