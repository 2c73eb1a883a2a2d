//! # Escrow Swap
//!
//! Two-party conditional exchange through escrow records.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Party A deposits an asset into an escrow record that names the key of a
//! counter-asset party B must supply to claim it:
//! - `create` opens the offer and commits to the key id up front
//! - `swap` exchanges both assets in one indivisible step
//! - `return_to_sender` lets A reclaim the asset if B never acts
//!
//! ## Guarantees
//!
//! | Guarantee | How |
//! |-----------|-----|
//! | Exclusive custody | The record owns the asset by value |
//! | Consumed once | Swap and cancel remove the record; a second attempt is `RecordNotFound` |
//! | Commitment matching | Key ids are content-derived, so a tampered counter-asset never matches |
//! | No partial effect | Rejections hand back every input untouched |
//!
//! ## Module Structure
//!
//! ```text
//! escrow-swap/
//! ├── domain/          # Escrow, Locked, Key, Coin, errors, invariants
//! ├── algorithms/      # Key derivation, precondition checks
//! ├── ports/           # EscrowApi, CommitmentPrimitive, EventSink, Custody
//! ├── adapters/        # HashLockCommitment, InMemoryCustody, EscrowLedger
//! └── service.rs       # EscrowService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{EscrowLedger, HashLockCommitment, InMemoryCustody};
pub use algorithms::{check_cancel, check_swap, derive_key_id, verify_binding};
pub use domain::{
    invariant_authorized_party, invariant_commitment_match, invariant_handle_bound, Asset,
    AssetError, Coin, CommitmentError, Escrow, EscrowConfig, EscrowError, EscrowStatus,
    EscrowView, Key, KeyId, Locked, Operation, SwapRejected, UnlockError,
};
pub use ports::{CommitmentPrimitive, Custody, EscrowApi, EventSink, RecordingSink};
pub use service::{EscrowService, EscrowStats};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
