//! # Escrow Service
//!
//! The escrow engine: owns the ledger of live offers and drives every
//! transition through the commitment primitive, the custody port and the
//! event sink.
//!
//! ## Serialization
//!
//! Each operation runs entirely under the ledger's write lock. Precondition
//! checks, the one-shot unlock, both asset movements and the event emission
//! happen inside that single critical section, so no intermediate state is
//! ever observable and events leave in the order operations were applied.

use crate::adapters::EscrowLedger;
use crate::algorithms::{check_cancel, check_swap};
use crate::domain::{
    Asset, Escrow, EscrowConfig, EscrowError, EscrowStatus, EscrowView, Key, KeyId, Locked,
    Operation, SwapRejected, UnlockError,
};
use crate::ports::inbound::EscrowApi;
use crate::ports::outbound::{CommitmentPrimitive, Custody, EventSink};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use shared_bus::EscrowEvent;
use shared_types::{Address, ObjectId};
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Statistics for the escrow service.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowStats {
    /// Offers created.
    pub created: u64,
    /// Offers taken by swap.
    pub swapped: u64,
    /// Offers cancelled by their sender.
    pub cancelled: u64,
    /// Rejected swap or cancel attempts.
    pub rejected: u64,
}

/// The escrow engine.
pub struct EscrowService<T, P, S, C>
where
    T: Asset,
    P: CommitmentPrimitive,
    S: EventSink,
    C: Custody,
{
    config: EscrowConfig,
    ledger: RwLock<EscrowLedger<T>>,
    commitment: P,
    sink: S,
    custody: C,
    stats: RwLock<EscrowStats>,
}

impl<T, P, S, C> EscrowService<T, P, S, C>
where
    T: Asset,
    P: CommitmentPrimitive,
    S: EventSink,
    C: Custody,
{
    /// Create a new escrow service.
    pub fn new(commitment: P, sink: S, custody: C, config: EscrowConfig) -> Self {
        Self {
            ledger: RwLock::new(EscrowLedger::new(config.retain_consumed)),
            config,
            commitment,
            sink,
            custody,
            stats: RwLock::new(EscrowStats::default()),
        }
    }

    /// Service configuration.
    pub fn config(&self) -> &EscrowConfig {
        &self.config
    }

    /// The commitment primitive this engine unlocks with.
    pub fn commitment(&self) -> &P {
        &self.commitment
    }

    /// The event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The custody port counter-assets are delivered to.
    pub fn custody(&self) -> &C {
        &self.custody
    }

    /// Get current service statistics.
    pub fn stats(&self) -> EscrowStats {
        self.stats.read().clone()
    }

    /// Number of live offers.
    pub fn active_count(&self) -> usize {
        self.ledger.read().active_len()
    }

    /// Live offers addressed to `recipient`, ordered by id.
    pub fn list_for_recipient(&self, recipient: &Address) -> Vec<EscrowView> {
        self.list_where(|escrow| escrow.recipient() == *recipient)
    }

    /// Live offers made by `sender`, ordered by id.
    pub fn list_for_sender(&self, sender: &Address) -> Vec<EscrowView> {
        self.list_where(|escrow| escrow.sender() == *sender)
    }

    fn list_where(&self, predicate: impl Fn(&Escrow<T>) -> bool) -> Vec<EscrowView> {
        let mut views: Vec<EscrowView> = self
            .ledger
            .read()
            .iter()
            .filter(|escrow| predicate(*escrow))
            .map(Escrow::view)
            .collect();
        views.sort_by_key(|view| view.id);
        views
    }

    fn emit(&self, event: EscrowEvent) -> Uuid {
        let tx_id = Uuid::new_v4();
        self.sink.emit(tx_id, event);
        tx_id
    }

    fn reject_swap<U>(&self, error: EscrowError, key: Key, locked: Locked<U>) -> SwapRejected<U> {
        warn!(%error, "Swap rejected");
        self.stats.write().rejected += 1;
        SwapRejected { error, key, locked }
    }
}

impl<T, P, S, C> EscrowApi<T> for EscrowService<T, P, S, C>
where
    T: Asset,
    P: CommitmentPrimitive,
    S: EventSink,
    C: Custody,
{
    #[instrument(skip_all, fields(sender = %sender.short(), recipient = %recipient.short()))]
    fn create(
        &self,
        sender: Address,
        recipient: Address,
        exchange_key: KeyId,
        escrowed: T,
    ) -> ObjectId {
        let id = ObjectId::fresh();
        let escrow = Escrow::new(id, sender, recipient, exchange_key, escrowed);
        let item_id = escrow.item_id();

        let mut ledger = self.ledger.write();
        ledger.insert(escrow);
        let tx_id = self.emit(EscrowEvent::Created {
            escrow_id: id,
            key_id: exchange_key,
            sender,
            recipient,
            item_id,
        });
        drop(ledger);

        self.stats.write().created += 1;
        info!(escrow = %id, tx = %tx_id, "Escrow created");
        id
    }

    #[instrument(skip_all, fields(escrow = %escrow_id.short(), caller = %caller.short()))]
    fn swap<U: Asset>(
        &self,
        caller: Address,
        escrow_id: ObjectId,
        key: Key,
        locked: Locked<U>,
    ) -> Result<T, SwapRejected<U>> {
        let mut ledger = self.ledger.write();

        // Preconditions, in diagnostic order. Nothing is touched yet.
        let Some(escrow) = ledger.get(&escrow_id) else {
            return Err(self.reject_swap(EscrowError::RecordNotFound(escrow_id), key, locked));
        };
        let presented = self.commitment.identity(&key);
        if let Err(error) = check_swap(escrow, &caller, &presented) {
            return Err(self.reject_swap(error, key, locked));
        }
        if let Err(error) = self.commitment.verify(&locked, &key) {
            return Err(self.reject_swap(error.into(), key, locked));
        }

        let Some(escrow) = ledger.take(&escrow_id, EscrowStatus::Swapped) else {
            return Err(self.reject_swap(EscrowError::RecordNotFound(escrow_id), key, locked));
        };

        let counter = match self.commitment.unlock(locked, key) {
            Ok(asset) => asset,
            Err(UnlockError { error, locked, key }) => {
                ledger.restore(escrow);
                return Err(self.reject_swap(error.into(), key, locked));
            }
        };

        let sender = escrow.sender();
        let counter_id = counter.id();
        self.custody.deliver(sender, counter);
        let tx_id = self.emit(EscrowEvent::Swapped { escrow_id });
        drop(ledger);

        self.stats.write().swapped += 1;
        info!(
            escrow = %escrow_id,
            tx = %tx_id,
            counter_item = %counter_id,
            "Escrow swapped"
        );
        Ok(escrow.into_asset())
    }

    #[instrument(skip_all, fields(escrow = %escrow_id.short(), caller = %caller.short()))]
    fn return_to_sender(&self, caller: Address, escrow_id: ObjectId) -> Result<T, EscrowError> {
        let mut ledger = self.ledger.write();

        let checked = match ledger.get(&escrow_id) {
            Some(escrow) => check_cancel(escrow, &caller),
            None => Err(EscrowError::RecordNotFound(escrow_id)),
        };
        if let Err(error) = checked {
            drop(ledger);
            warn!(%error, operation = %Operation::Cancel, "Cancel rejected");
            self.stats.write().rejected += 1;
            return Err(error);
        }

        let escrow = ledger
            .take(&escrow_id, EscrowStatus::Cancelled)
            .ok_or(EscrowError::RecordNotFound(escrow_id))?;
        let tx_id = self.emit(EscrowEvent::Cancelled { escrow_id });
        drop(ledger);

        self.stats.write().cancelled += 1;
        info!(escrow = %escrow_id, tx = %tx_id, "Escrow returned to sender");
        Ok(escrow.into_asset())
    }

    fn get(&self, escrow_id: &ObjectId) -> Option<EscrowView> {
        self.ledger.read().get(escrow_id).map(Escrow::view)
    }

    fn status(&self, escrow_id: &ObjectId) -> Option<EscrowStatus> {
        self.ledger.read().status(escrow_id)
    }
}
