//! # Inbound Ports
//!
//! API trait defining what the escrow engine can do.

use crate::domain::{
    Asset, EscrowError, EscrowStatus, EscrowView, Key, KeyId, Locked, SwapRejected,
};
use shared_types::{Address, ObjectId};

/// Escrow API - inbound port.
///
/// Each operation is one indivisible transition: it either completes
/// with all of its effects or is rejected with none.
pub trait EscrowApi<T: Asset>: Send + Sync {
    /// Open an offer: `sender` deposits `escrowed` for `recipient`, who
    /// must later present the key identified by `exchange_key`.
    fn create(
        &self,
        sender: Address,
        recipient: Address,
        exchange_key: KeyId,
        escrowed: T,
    ) -> ObjectId;

    /// Take the offer by handing over the locked counter-asset and its key.
    ///
    /// On success the counter-asset goes to the record's sender and the
    /// escrowed asset is returned. On rejection the key and handle come
    /// back untouched inside [`SwapRejected`].
    fn swap<U: Asset>(
        &self,
        caller: Address,
        escrow_id: ObjectId,
        key: Key,
        locked: Locked<U>,
    ) -> Result<T, SwapRejected<U>>;

    /// Cancel the offer, giving the escrowed asset back to its sender.
    fn return_to_sender(&self, caller: Address, escrow_id: ObjectId) -> Result<T, EscrowError>;

    /// Snapshot of an active record.
    fn get(&self, escrow_id: &ObjectId) -> Option<EscrowView>;

    /// Lifecycle state of a record, including consumed ones.
    fn status(&self, escrow_id: &ObjectId) -> Option<EscrowStatus>;
}
