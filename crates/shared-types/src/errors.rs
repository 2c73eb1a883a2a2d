//! # Error Types
//!
//! Errors raised while parsing shared identifiers.

use thiserror::Error;

/// Errors that can occur when parsing an [`ObjectId`](crate::ObjectId) or
/// [`Address`](crate::Address) from text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IdParseError {
    /// Input was not valid hex.
    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Input decoded to the wrong number of bytes.
    #[error("Invalid length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
}
