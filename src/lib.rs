mod audit;
mod clients;
mod config;
mod error;
mod events;
mod order;
mod service;
mod store;

pub use audit::{hydrate, Aggregate, AuditLog, HydrateError, PayloadError, TransitionRecord};
pub use clients::{
    Address, Basket, BasketClient, BasketItem, ClientError, ClientResult, CustomerDirectory,
    CustomerProfile, PaymentDecline, PaymentGateway, PaymentReceipt,
};
pub use config::TopicConfig;
pub use error::OrderError;
pub use events::{
    AddressInfo, CustomerInfo, EventPublisher, ItemInfo, LogPublisher, OrderCreatedEvent,
    OrderReceivedEvent, PublishError,
};
#[cfg(feature = "emitter")]
pub use events::LocalEmitterPublisher;
pub use order::{Order, OrderLine, OrderSnapshot, OrderStatus, PaymentMethod};
pub use service::{OrderRequest, OrderService, OrderSummary};
pub use store::{MemoryOrderStore, OrderLineStore, OrderStore, StoreError};

// Re-export the EventEmitter so emitter-based deployments don't need a
// direct dependency on the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
