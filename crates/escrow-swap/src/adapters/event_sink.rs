//! Event Bus Sink Adapter
//!
//! Implements `EventSink` on top of the shared in-memory bus.

use crate::ports::outbound::EventSink;
use shared_bus::{EscrowEvent, EventPublisher, InMemoryEventBus};
use tracing::debug;
use uuid::Uuid;

impl EventSink for InMemoryEventBus {
    fn emit(&self, tx_id: Uuid, event: EscrowEvent) {
        let receivers = self.publish(tx_id, event);
        debug!("[escrow] Event from tx {} reached {} receivers", tx_id, receivers);
    }
}
