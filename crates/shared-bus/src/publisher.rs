//! # Event Publisher
//!
//! Defines the publishing side of the event bus.

use crate::events::{EscrowEvent, EventFilter, SequencedEvent};
use crate::subscriber::{EventStream, EventSubscriber, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, warn};
use uuid::Uuid;

/// Trait for publishing events to the bus.
///
/// Publishing never blocks and never fails from the caller's point of view:
/// the engine hands the event over and moves on.
pub trait EventPublisher: Send + Sync {
    /// Publish an event produced by operation `tx_id`.
    ///
    /// # Returns
    ///
    /// The number of active subscribers that received the event.
    fn publish(&self, tx_id: Uuid, event: EscrowEvent) -> usize;

    /// Get the total number of events published.
    fn events_published(&self) -> u64;
}

/// In-memory implementation of the event bus.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer semantics.
pub struct InMemoryEventBus {
    /// Broadcast sender for events.
    sender: broadcast::Sender<SequencedEvent>,

    /// Next sequence number. Held across the send so that sequence order
    /// and delivery order agree.
    next_sequence: Mutex<u64>,

    /// Total events published.
    events_published: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl InMemoryEventBus {
    /// Create a new in-memory event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new in-memory event bus with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            next_sequence: Mutex::new(0),
            events_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to events matching a filter.
    ///
    /// Only events published after this call are delivered.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        let receiver = self.sender.subscribe();
        debug!(topics = ?filter.topics, "New subscription created");
        Subscription::new(receiver, filter)
    }

    /// Get a stream of events matching a filter.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        EventStream::new(self.subscribe(filter))
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, filter: EventFilter) -> Subscription {
        InMemoryEventBus::subscribe(self, filter)
    }
}

impl EventPublisher for InMemoryEventBus {
    fn publish(&self, tx_id: Uuid, event: EscrowEvent) -> usize {
        let topic = event.topic();
        let escrow_id = event.escrow_id();

        let mut next = match self.next_sequence.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let sequence = *next;
        *next += 1;

        // Always increment counter (event was attempted)
        self.events_published.fetch_add(1, Ordering::Relaxed);

        let sequenced = SequencedEvent {
            sequence,
            tx_id,
            event,
        };

        match self.sender.send(sequenced) {
            Ok(receiver_count) => {
                debug!(
                    topic = ?topic,
                    escrow = %escrow_id,
                    sequence,
                    receivers = receiver_count,
                    "Event published"
                );
                receiver_count
            }
            Err(e) => {
                // No receivers - event is dropped
                warn!(
                    topic = ?topic,
                    escrow = %escrow_id,
                    sequence,
                    error = %e,
                    "Event dropped (no receivers)"
                );
                0
            }
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}
