//! # Offer Projection
//!
//! Folds the escrow event stream into the set of open offers, the way a
//! downstream indexer would. Nothing here reads the engine's ledger.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use shared_bus::{EscrowEvent, EventStream, SequencedEvent};
use shared_types::{Address, ObjectId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// An offer as seen from the event stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOffer {
    /// Key the recipient must present.
    pub key_id: ObjectId,
    /// Depositing party.
    pub sender: Address,
    /// Party allowed to swap.
    pub recipient: Address,
    /// Escrowed item.
    pub item_id: ObjectId,
}

/// Ingestion cursor: the last event applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Bus sequence of the last applied event.
    pub sequence: u64,
    /// Transaction that produced it.
    pub tx_id: Uuid,
}

/// Materialized view of open offers.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct OfferProjection {
    open: HashMap<ObjectId, OpenOffer>,
    swapped: u64,
    cancelled: u64,
    missed: u64,
    cursor: Option<Cursor>,
}

impl OfferProjection {
    /// Create an empty projection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. Returns false if it was at or behind the cursor.
    ///
    /// A jump past `cursor + 1` is applied but logged, and the skipped
    /// sequences are added to [`missed`](Self::missed).
    pub fn apply(&mut self, sequenced: &SequencedEvent) -> bool {
        if let Some(cursor) = self.cursor {
            if sequenced.sequence <= cursor.sequence {
                debug!(sequence = sequenced.sequence, "Skipping replayed event");
                return false;
            }
            let gap = sequenced.sequence - cursor.sequence - 1;
            if gap > 0 {
                warn!(
                    after = cursor.sequence,
                    sequence = sequenced.sequence,
                    missed = gap,
                    "Gap in event stream, events lost"
                );
                self.missed += gap;
            }
        }

        match &sequenced.event {
            EscrowEvent::Created {
                escrow_id,
                key_id,
                sender,
                recipient,
                item_id,
            } => {
                self.open.insert(
                    *escrow_id,
                    OpenOffer {
                        key_id: *key_id,
                        sender: *sender,
                        recipient: *recipient,
                        item_id: *item_id,
                    },
                );
            }
            EscrowEvent::Swapped { escrow_id } => {
                if self.open.remove(escrow_id).is_none() {
                    warn!(escrow = %escrow_id, "Swap for unknown offer");
                }
                self.swapped += 1;
            }
            EscrowEvent::Cancelled { escrow_id } => {
                if self.open.remove(escrow_id).is_none() {
                    warn!(escrow = %escrow_id, "Cancel for unknown offer");
                }
                self.cancelled += 1;
            }
        }

        self.cursor = Some(Cursor {
            sequence: sequenced.sequence,
            tx_id: sequenced.tx_id,
        });
        true
    }

    /// Open offer by escrow id.
    pub fn offer(&self, escrow_id: &ObjectId) -> Option<&OpenOffer> {
        self.open.get(escrow_id)
    }

    /// Number of open offers.
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Offers closed by swap.
    pub fn swapped(&self) -> u64 {
        self.swapped
    }

    /// Offers closed by cancel.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }

    /// Sequences skipped over since the first applied event.
    pub fn missed(&self) -> u64 {
        self.missed
    }

    /// Last applied event.
    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }
}

/// Consume `stream` into `projection` until it closes or `shutdown` fires.
///
/// Returns the number of events applied.
pub async fn run_projection(
    mut stream: EventStream,
    projection: Arc<RwLock<OfferProjection>>,
    mut shutdown: watch::Receiver<bool>,
) -> u64 {
    let mut applied = 0u64;
    loop {
        tokio::select! {
            next = stream.next() => match next {
                Some(event) => {
                    if projection.write().apply(&event) {
                        applied += 1;
                    }
                }
                None => break,
            },
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    info!(applied, "Projection stopped");
    applied
}
