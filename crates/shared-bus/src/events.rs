//! # Escrow Events
//!
//! Defines every event that flows through the bus. Events are write-once:
//! nothing on the bus is ever revised, and each one carries enough
//! identifiers for an observer to rebuild escrow state without reading the
//! record itself.

use serde::{Deserialize, Serialize};
use shared_types::{Address, ObjectId};
use uuid::Uuid;

/// One escrow state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EscrowEvent {
    /// A new escrow offer was created and is now discoverable.
    Created {
        /// The escrow record's id.
        escrow_id: ObjectId,
        /// The key the recipient must present.
        key_id: ObjectId,
        /// The party that deposited the asset.
        sender: Address,
        /// The party allowed to swap.
        recipient: Address,
        /// Identity of the escrowed asset.
        item_id: ObjectId,
    },

    /// The offer was taken: both assets changed hands.
    Swapped {
        /// The consumed escrow record's id.
        escrow_id: ObjectId,
    },

    /// The sender reclaimed the asset.
    Cancelled {
        /// The consumed escrow record's id.
        escrow_id: ObjectId,
    },
}

impl EscrowEvent {
    /// Get the topic for this event.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::Created { .. } => EventTopic::Created,
            Self::Swapped { .. } => EventTopic::Swapped,
            Self::Cancelled { .. } => EventTopic::Cancelled,
        }
    }

    /// The escrow record this event correlates with.
    #[must_use]
    pub fn escrow_id(&self) -> ObjectId {
        match self {
            Self::Created { escrow_id, .. }
            | Self::Swapped { escrow_id }
            | Self::Cancelled { escrow_id } => *escrow_id,
        }
    }

    /// True for events that end a record's life.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Created { .. })
    }
}

/// An event as delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencedEvent {
    /// Bus-wide publish order, starting at 0.
    pub sequence: u64,
    /// The operation that produced the event.
    pub tx_id: Uuid,
    /// The event itself.
    pub event: EscrowEvent,
}

/// Event topics for filtering subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Offer creation.
    Created,
    /// Successful swaps.
    Swapped,
    /// Sender cancellations.
    Cancelled,
    /// Every topic.
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Escrow records to include. Empty means all records.
    pub escrow_ids: Vec<ObjectId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            escrow_ids: Vec::new(),
        }
    }

    /// Create a filter following a single escrow record.
    #[must_use]
    pub fn escrow(escrow_id: ObjectId) -> Self {
        Self {
            topics: Vec::new(),
            escrow_ids: vec![escrow_id],
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &EscrowEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let escrow_match =
            self.escrow_ids.is_empty() || self.escrow_ids.contains(&event.escrow_id());

        topic_match && escrow_match
    }
}
