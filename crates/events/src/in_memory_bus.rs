//! In-process event bus.

use std::sync::{Mutex, mpsc};

use crate::bus::{EventBus, Subscription};

#[derive(Debug, PartialEq, Eq)]
pub enum InMemoryBusError {
    /// Publish failed due to internal lock poisoning.
    Poisoned,
}

impl core::fmt::Display for InMemoryBusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InMemoryBusError::Poisoned => f.write_str("event bus lock poisoned"),
        }
    }
}

impl std::error::Error for InMemoryBusError {}

/// In-memory pub/sub bus.
///
/// - No IO / no async
/// - Fan-out to every live subscription, in publish order
/// - Subscriptions whose receiver was dropped are pruned on the next publish
#[derive(Debug)]
pub struct InMemoryEventBus<M> {
    subscribers: Mutex<Vec<mpsc::Sender<M>>>,
}

impl<M> InMemoryEventBus<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subscriptions still attached (as of the last publish).
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|subs| subs.len()).unwrap_or(0)
    }
}

impl<M> Default for InMemoryEventBus<M> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<M> EventBus<M> for InMemoryEventBus<M>
where
    M: Clone + Send + 'static,
{
    type Error = InMemoryBusError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        let mut subs = self.subscribers.lock().map_err(|_| InMemoryBusError::Poisoned)?;

        let before = subs.len();
        subs.retain(|tx| tx.send(message.clone()).is_ok());
        if subs.len() != before {
            tracing::trace!(dropped = before - subs.len(), "pruned closed subscriptions");
        }

        Ok(())
    }

    fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();

        // A poisoned lock still yields a subscription; it just never receives.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Event, EventEnvelope};

    #[derive(Debug, Clone, PartialEq)]
    struct Toggled(bool);

    impl Event for Toggled {
        fn event_type(&self) -> &'static str {
            "test.toggled"
        }
    }

    #[test]
    fn every_subscription_sees_every_event_in_order() {
        let bus = InMemoryEventBus::new();
        let first = bus.subscribe();
        let second = bus.subscribe();

        bus.publish(EventEnvelope::new(1, Toggled(true))).unwrap();
        bus.publish(EventEnvelope::new(2, Toggled(false))).unwrap();

        for sub in [&first, &second] {
            let seen: Vec<_> = sub.drain().into_iter().map(|e| e.into_payload()).collect();
            assert_eq!(seen, vec![Toggled(true), Toggled(false)]);
        }
    }

    #[test]
    fn late_subscribers_miss_earlier_events() {
        let bus = InMemoryEventBus::new();
        bus.publish(EventEnvelope::new(1, Toggled(true))).unwrap();

        let late = bus.subscribe();
        assert!(late.next_pending().is_none());
    }

    #[test]
    fn dropped_subscriptions_are_pruned() {
        let bus: InMemoryEventBus<EventEnvelope<Toggled>> = InMemoryEventBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(EventEnvelope::new(1, Toggled(true))).unwrap();
        assert_eq!(bus.subscriber_count(), 1);

        let envelope = kept.next_pending().unwrap();
        assert_eq!(envelope.event_type(), "test.toggled");
        assert_eq!(envelope.sequence_number(), 1);
    }
}
