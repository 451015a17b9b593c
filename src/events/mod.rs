#[cfg(feature = "emitter")]
mod emitter;
mod order_created;
mod order_received;
mod publisher;

#[cfg(feature = "emitter")]
pub use emitter::LocalEmitterPublisher;
pub use order_created::{AddressInfo, CustomerInfo, ItemInfo, OrderCreatedEvent};
pub use order_received::OrderReceivedEvent;
pub use publisher::{EventPublisher, LogPublisher, PublishError};
