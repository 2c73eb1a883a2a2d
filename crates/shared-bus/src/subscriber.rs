//! # Event Subscriber
//!
//! Defines the subscription side of the event bus.

use crate::events::{EventFilter, SequencedEvent};
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tracing::warn;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The event bus was closed.
    #[error("Event bus closed")]
    Closed,
}

/// Trait for subscribing to events from the bus.
pub trait EventSubscriber: Send + Sync {
    /// Subscribe to events matching a filter.
    fn subscribe(&self, filter: EventFilter) -> Subscription;
}

/// A subscription handle for receiving events.
///
/// Dropping it releases the underlying broadcast receiver.
pub struct Subscription {
    /// The broadcast receiver.
    receiver: broadcast::Receiver<SequencedEvent>,

    /// Filter for this subscription.
    filter: EventFilter,

    /// Events lost to lag since the subscription was created.
    lagged: u64,
}

impl Subscription {
    /// Create a new subscription.
    pub(crate) fn new(receiver: broadcast::Receiver<SequencedEvent>, filter: EventFilter) -> Self {
        Self {
            receiver,
            filter,
            lagged: 0,
        }
    }

    /// Receive the next event that matches the filter.
    ///
    /// # Returns
    ///
    /// - `Some(event)` - The next matching event
    /// - `None` - The channel was closed (bus dropped)
    pub async fn recv(&mut self) -> Option<SequencedEvent> {
        loop {
            let event = match self.receiver.recv().await {
                Ok(e) => e,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    warn!(lagged = count, "Subscriber lagged, some events dropped");
                    self.lagged += count;
                    continue;
                }
            };

            if self.filter.matches(&event.event) {
                return Some(event);
            }
        }
    }

    /// Try to receive the next event without blocking.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(event))` - An event was available and matched
    /// - `Ok(None)` - No event available (would block)
    /// - `Err(SubscriptionError::Closed)` - The channel was closed
    pub fn try_recv(&mut self) -> Result<Option<SequencedEvent>, SubscriptionError> {
        loop {
            let event = match self.receiver.try_recv() {
                Ok(e) => e,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(count)) => {
                    self.lagged += count;
                    continue;
                }
            };

            if self.filter.matches(&event.event) {
                return Ok(Some(event));
            }
        }
    }

    /// Get the filter for this subscription.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    /// Number of events this subscriber missed because it fell behind.
    #[must_use]
    pub fn lagged(&self) -> u64 {
        self.lagged
    }
}

/// A stream wrapper for subscriptions.
///
/// Implements `tokio_stream::Stream` for use with stream combinators. The
/// task is parked on the broadcast channel while nothing is buffered.
pub struct EventStream {
    inner: BroadcastStream<SequencedEvent>,
    filter: EventFilter,
    lagged: u64,
}

impl EventStream {
    /// Create a new event stream from a subscription.
    #[must_use]
    pub fn new(subscription: Subscription) -> Self {
        let Subscription {
            receiver,
            filter,
            lagged,
        } = subscription;
        Self {
            inner: BroadcastStream::new(receiver),
            filter,
            lagged,
        }
    }

    /// Get the filter for this stream.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    /// Number of events this stream missed because it fell behind.
    #[must_use]
    pub fn lagged(&self) -> u64 {
        self.lagged
    }
}

impl Stream for EventStream {
    type Item = SequencedEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match ready!(Pin::new(&mut this.inner).poll_next(cx)) {
                Some(Ok(event)) => {
                    if this.filter.matches(&event.event) {
                        return Poll::Ready(Some(event));
                    }
                }
                Some(Err(BroadcastStreamRecvError::Lagged(count))) => {
                    warn!(lagged = count, "Stream lagged, some events dropped");
                    this.lagged += count;
                }
                None => return Poll::Ready(None),
            }
        }
    }
}
