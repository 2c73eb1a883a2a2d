//! # Domain Entities
//!
//! Core entities for the escrow engine.

use super::assets::Asset;
use super::value_objects::KeyId;
use serde::{Deserialize, Serialize};
use shared_types::{Address, ObjectId};
use tracing::warn;

/// An escrow offer holding one party's asset until the counter-asset
/// committed to by `exchange_key` is supplied.
///
/// Every field is fixed at creation. The record is the sole owner of the
/// escrowed asset; the only way to get it back out is to consume the
/// record.
#[derive(Debug)]
pub struct Escrow<T> {
    id: ObjectId,
    sender: Address,
    recipient: Address,
    exchange_key: KeyId,
    escrowed: T,
}

impl<T: Asset> Escrow<T> {
    /// Create a new record that takes ownership of `escrowed`.
    pub(crate) fn new(
        id: ObjectId,
        sender: Address,
        recipient: Address,
        exchange_key: KeyId,
        escrowed: T,
    ) -> Self {
        Self {
            id,
            sender,
            recipient,
            exchange_key,
            escrowed,
        }
    }

    /// Record id.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Party that created the offer.
    pub fn sender(&self) -> Address {
        self.sender
    }

    /// Party allowed to swap.
    pub fn recipient(&self) -> Address {
        self.recipient
    }

    /// Key the recipient must present.
    pub fn exchange_key(&self) -> KeyId {
        self.exchange_key
    }

    /// Identity of the escrowed asset.
    pub fn item_id(&self) -> ObjectId {
        self.escrowed.id()
    }

    /// Read-only snapshot of the record.
    pub fn view(&self) -> EscrowView {
        EscrowView {
            id: self.id,
            sender: self.sender,
            recipient: self.recipient,
            exchange_key: self.exchange_key,
            item_id: self.item_id(),
        }
    }

    /// Consume the record, releasing the asset.
    pub(crate) fn into_asset(self) -> T {
        self.escrowed
    }
}

/// Snapshot of an active escrow record. Never carries the asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowView {
    /// Record id.
    pub id: ObjectId,
    /// Party that created the offer.
    pub sender: Address,
    /// Party allowed to swap.
    pub recipient: Address,
    /// Key the recipient must present.
    pub exchange_key: KeyId,
    /// Identity of the escrowed asset.
    pub item_id: ObjectId,
}

/// An asset sealed by the commitment primitive and bound to one key.
#[derive(Debug)]
pub struct Locked<U> {
    pub(crate) id: ObjectId,
    pub(crate) key_id: KeyId,
    pub(crate) asset: U,
}

impl<U: Asset> Locked<U> {
    /// Handle id.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Identity of the key this handle was bound to at lock time.
    pub fn key_id(&self) -> KeyId {
        self.key_id
    }

    /// Identity of the sealed asset.
    pub fn item_id(&self) -> ObjectId {
        self.asset.id()
    }
}

/// Single-use key for a [`Locked`] handle.
///
/// Neither `Clone` nor `Copy`: unlocking takes it by value, so it can be
/// spent at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct Key {
    pub(crate) id: KeyId,
}

impl Key {
    /// Key identity.
    pub fn id(&self) -> KeyId {
        self.id
    }
}

/// Escrow engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowConfig {
    /// Remember the terminal status of consumed records so `status` can
    /// tell "swapped" and "cancelled" apart from "never existed".
    pub retain_consumed: bool,
    /// Buffer size of the event bus each subscriber gets.
    pub event_channel_capacity: usize,
}

impl Default for EscrowConfig {
    fn default() -> Self {
        Self {
            retain_consumed: true,
            event_channel_capacity: shared_bus::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl EscrowConfig {
    /// Load from environment variables.
    ///
    /// - `ESCROW_RETAIN_CONSUMED`: `1`/`true` or `0`/`false`
    /// - `ESCROW_EVENT_CAPACITY`: positive integer
    ///
    /// Unparseable values keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("ESCROW_RETAIN_CONSUMED") {
            match val.to_lowercase().as_str() {
                "1" | "true" => config.retain_consumed = true,
                "0" | "false" => config.retain_consumed = false,
                _ => warn!(value = %val, "Ignoring invalid ESCROW_RETAIN_CONSUMED"),
            }
        }

        if let Some(val) = lookup("ESCROW_EVENT_CAPACITY") {
            match val.parse::<usize>() {
                Ok(capacity) if capacity > 0 => config.event_channel_capacity = capacity,
                _ => warn!(value = %val, "Ignoring invalid ESCROW_EVENT_CAPACITY"),
            }
        }

        config
    }
}
