//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits for the escrow engine.

mod custody;
mod event_sink;
mod hash_lock;
mod ledger;

pub use custody::InMemoryCustody;
pub use hash_lock::HashLockCommitment;
pub use ledger::EscrowLedger;
