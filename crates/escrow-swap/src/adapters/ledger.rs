//! Escrow Ledger
//!
//! In-memory index of live escrow records plus tombstones for consumed ones.

use crate::domain::{Asset, Escrow, EscrowStatus};
use shared_types::ObjectId;
use std::collections::HashMap;
use tracing::debug;

/// Live records by id.
///
/// A record leaves `active` exactly once. If `retain_consumed` is set its
/// terminal status is kept so that "already consumed" stays observable.
pub struct EscrowLedger<T> {
    active: HashMap<ObjectId, Escrow<T>>,
    consumed: HashMap<ObjectId, EscrowStatus>,
    retain_consumed: bool,
}

impl<T: Asset> EscrowLedger<T> {
    /// Create an empty ledger.
    pub fn new(retain_consumed: bool) -> Self {
        Self {
            active: HashMap::new(),
            consumed: HashMap::new(),
            retain_consumed,
        }
    }

    /// Add a freshly created record.
    pub(crate) fn insert(&mut self, escrow: Escrow<T>) {
        debug!("[escrow] Indexed record {}", escrow.id().short());
        self.active.insert(escrow.id(), escrow);
    }

    /// Live record by id.
    pub fn get(&self, id: &ObjectId) -> Option<&Escrow<T>> {
        self.active.get(id)
    }

    /// Remove a live record, leaving a tombstone with `status`.
    pub(crate) fn take(&mut self, id: &ObjectId, status: EscrowStatus) -> Option<Escrow<T>> {
        let escrow = self.active.remove(id)?;
        if self.retain_consumed {
            self.consumed.insert(*id, status);
        }
        debug!("[escrow] Removed record {} as {:?}", id.short(), status);
        Some(escrow)
    }

    /// Put back a record taken in the same critical section, erasing its
    /// tombstone.
    pub(crate) fn restore(&mut self, escrow: Escrow<T>) {
        self.consumed.remove(&escrow.id());
        debug!("[escrow] Restored record {}", escrow.id().short());
        self.active.insert(escrow.id(), escrow);
    }

    /// Lifecycle state, or `None` if unknown.
    pub fn status(&self, id: &ObjectId) -> Option<EscrowStatus> {
        if self.active.contains_key(id) {
            return Some(EscrowStatus::Active);
        }
        self.consumed.get(id).copied()
    }

    /// Number of live records.
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Number of tombstones held.
    pub fn consumed_len(&self) -> usize {
        self.consumed.len()
    }

    /// Iterate live records in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Escrow<T>> {
        self.active.values()
    }
}
