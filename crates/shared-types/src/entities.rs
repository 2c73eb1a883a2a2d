//! # Core Identifiers
//!
//! Defines the identifiers every escrow component agrees on.
//!
//! ## Kinds
//!
//! - **Objects**: `ObjectId` names escrow records, keys, locked handles and
//!   the assets themselves.
//! - **Parties**: `Address` names the sender, recipient or any caller.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::errors::IdParseError;

/// A 32-byte SHA-256 digest.
pub type Hash = [u8; 32];

/// Parse 32 bytes from hex, accepting an optional `0x` prefix.
fn parse_hex_32(s: &str) -> Result<[u8; 32], IdParseError> {
    let trimmed = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(trimmed)?;
    if bytes.len() != 32 {
        return Err(IdParseError::InvalidLength(bytes.len()));
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    Ok(out)
}

macro_rules! hex_identifier {
    ($name:ident) => {
        impl $name {
            /// Wrap raw bytes.
            #[must_use]
            pub const fn new(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// Borrow the raw bytes.
            #[must_use]
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Short hex prefix for log lines.
            #[must_use]
            pub fn short(&self) -> String {
                hex::encode(&self.0[..4])
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({}..)", stringify!($name), self.short())
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_hex_32(s).map(Self)
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }
    };
}

/// Globally unique identifier of an on-ledger object.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct ObjectId(pub [u8; 32]);

hex_identifier!(ObjectId);

impl ObjectId {
    /// Allocate a fresh random identifier.
    #[must_use]
    pub fn fresh() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Derive an identifier from a domain tag and ordered parts.
    ///
    /// Identical inputs always produce the same id; any change to a part
    /// produces a different one.
    #[must_use]
    pub fn derive(tag: &[u8], parts: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((tag.len() as u64).to_le_bytes());
        hasher.update(tag);
        for part in parts {
            hasher.update((part.len() as u64).to_le_bytes());
            hasher.update(part);
        }
        Self(hasher.finalize().into())
    }
}

/// Identity of a party (sender, recipient or caller).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Address(pub [u8; 32]);

hex_identifier!(Address);
