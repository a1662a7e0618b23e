//! Change notifications between stores and the presentation layer.
//!
//! Stores publish small events when observable state changes; presentation
//! adapters subscribe and apply them. Nothing here knows about storage.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
