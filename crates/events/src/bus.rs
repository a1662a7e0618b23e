//! Publish/subscribe abstraction (mechanics only).
//!
//! A store publishes an event after its state changed; every subscription
//! receives its own copy (broadcast semantics). Delivery is in publish order
//! per subscription. The bus stores nothing: a subscriber that attaches late
//! does not see earlier events, so observers read the current state once when
//! they attach and then follow the stream.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};

/// A subscription to an event stream.
///
/// ```ignore
/// let subscription = bus.subscribe();
/// while let Some(event) = subscription.next_pending() {
///     apply(event);
/// }
/// ```
///
/// Subscriptions are meant for a single consumer.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Next already-published message, without blocking.
    ///
    /// Returns `None` both when nothing is pending and when the bus was dropped.
    pub fn next_pending(&self) -> Option<M> {
        match self.receiver.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drain every pending message, oldest first.
    pub fn drain(&self) -> Vec<M> {
        std::iter::from_fn(|| self.next_pending()).collect()
    }
}

/// Transport-agnostic event bus.
///
/// The trait requires `Send + Sync` so one bus can be shared (behind `Arc`)
/// by every store built at startup.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
