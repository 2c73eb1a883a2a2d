//! # Domain Module
//!
//! Core domain types for the escrow engine.

pub mod assets;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use assets::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
