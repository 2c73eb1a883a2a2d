//! # Outbound Ports
//!
//! Traits for external collaborators (commitment primitive, event sink,
//! custody of delivered assets).

use crate::algorithms::verify_binding;
use crate::domain::{Asset, CommitmentError, Key, KeyId, Locked, UnlockError};
use parking_lot::Mutex;
use shared_bus::EscrowEvent;
use shared_types::Address;
use std::sync::Arc;
use uuid::Uuid;

/// Commitment primitive - outbound port.
///
/// `unlock` succeeds iff the key's identity equals the identity recorded
/// in the handle at lock time. Since [`Key`] is not `Clone`, each key
/// opens at most one handle.
pub trait CommitmentPrimitive: Send + Sync {
    /// Seal `asset` and bind it to a fresh key.
    fn lock<U: Asset>(&self, asset: U) -> (Locked<U>, Key);

    /// Read-only check that `key` opens `locked`.
    fn verify<U: Asset>(&self, locked: &Locked<U>, key: &Key) -> Result<(), CommitmentError> {
        verify_binding(locked, key)
    }

    /// Open the handle, consuming both it and the key.
    ///
    /// On mismatch both are handed back inside the error.
    fn unlock<U: Asset>(&self, locked: Locked<U>, key: Key) -> Result<U, UnlockError<U>>;

    /// Stable, content-derived identity of a key.
    fn identity(&self, key: &Key) -> KeyId {
        key.id()
    }
}

impl<P: CommitmentPrimitive> CommitmentPrimitive for Arc<P> {
    fn lock<U: Asset>(&self, asset: U) -> (Locked<U>, Key) {
        (**self).lock(asset)
    }

    fn verify<U: Asset>(&self, locked: &Locked<U>, key: &Key) -> Result<(), CommitmentError> {
        (**self).verify(locked, key)
    }

    fn unlock<U: Asset>(&self, locked: Locked<U>, key: Key) -> Result<U, UnlockError<U>> {
        (**self).unlock(locked, key)
    }

    fn identity(&self, key: &Key) -> KeyId {
        (**self).identity(key)
    }
}

/// Event sink - outbound port.
///
/// Fire-and-forget: the engine never learns whether anyone listened.
pub trait EventSink: Send + Sync {
    /// Append one event produced by transaction `tx_id`.
    fn emit(&self, tx_id: Uuid, event: EscrowEvent);
}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn emit(&self, tx_id: Uuid, event: EscrowEvent) {
        (**self).emit(tx_id, event)
    }
}

/// Custody of delivered assets - outbound port.
///
/// Receives the counter-asset of a successful swap on behalf of the
/// record's sender.
pub trait Custody: Send + Sync {
    /// Transfer ownership of `asset` to `recipient`.
    fn deliver<U: Asset>(&self, recipient: Address, asset: U);
}

impl<C: Custody> Custody for Arc<C> {
    fn deliver<U: Asset>(&self, recipient: Address, asset: U) {
        (**self).deliver(recipient, asset)
    }
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Event sink that records everything it is given.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(Uuid, EscrowEvent)>>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events emitted so far, in order.
    pub fn events(&self) -> Vec<EscrowEvent> {
        self.events.lock().iter().map(|(_, e)| e.clone()).collect()
    }

    /// Events with their transaction ids.
    pub fn entries(&self) -> Vec<(Uuid, EscrowEvent)> {
        self.events.lock().clone()
    }

    /// Number of events emitted.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// True if nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, tx_id: Uuid, event: EscrowEvent) {
        self.events.lock().push((tx_id, event));
    }
}
