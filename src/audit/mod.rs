mod aggregate;
mod log;
mod record;

pub use aggregate::{hydrate, Aggregate, HydrateError};
pub use log::AuditLog;
pub use record::{PayloadError, TransitionRecord};
