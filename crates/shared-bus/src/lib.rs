//! # Shared Bus - Escrow Event Sink
//!
//! Append-only notification channel for escrow state transitions.
//!
//! ## Rules
//!
//! - The engine writes one event per successful transition, synchronously,
//!   while the transition is still serialized.
//! - Every event is stamped with a bus-wide `sequence` in publish order.
//! - Delivery is fire-and-forget: a publish with no subscribers is counted
//!   and dropped.
//!
//! ```text
//! ┌──────────────┐   publish()    ┌──────────────┐   subscribe()   ┌──────────────┐
//! │ Escrow Engine│ ─────────────▶ │  Event Bus   │ ──────────────▶ │   Indexer    │
//! └──────────────┘                └──────────────┘                 └──────────────┘
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EscrowEvent, EventFilter, EventTopic, SequencedEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Current schema version of [`SequencedEvent`].
pub const PROTOCOL_VERSION: u16 = 1;

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
