//! # Shared Types Crate
//!
//! Identifiers used across the escrow workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: object and party identities are defined once
//!   and shared by the engine, the event bus and any downstream consumer.
//! - **Opaque Bytes**: every identifier is 32 bytes, displayed and parsed as hex.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
