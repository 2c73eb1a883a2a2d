//! # Algorithms Module
//!
//! Key derivation and the ordered precondition checks of the escrow engine.

pub mod commitment;
pub mod escrow;

pub use commitment::{derive_key_id, derive_locked_id, generate_salt, verify_binding};
pub use escrow::{check_cancel, check_swap};
