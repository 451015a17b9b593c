use std::fmt;

use super::log::AuditLog;
use super::record::TransitionRecord;

/// A domain state machine rebuilt from its audit trail.
pub trait Aggregate: Sized + Default {
    type ReplayError: fmt::Display;

    fn audit(&self) -> &AuditLog;
    fn audit_mut(&mut self) -> &mut AuditLog;

    /// Apply one accepted record to in-memory state.
    fn replay(&mut self, record: &TransitionRecord) -> Result<(), Self::ReplayError>;
}

/// Error when an audit trail cannot be replayed into an aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HydrateError {
    pub message: String,
}

impl fmt::Display for HydrateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "replay error: {}", self.message)
    }
}

impl std::error::Error for HydrateError {}

/// Rebuild an aggregate by replaying the accepted records of an audit log.
/// Rejected transition attempts stay visible in the log but never touch
/// state.
pub fn hydrate<A: Aggregate>(log: AuditLog) -> Result<A, HydrateError> {
    let mut aggregate = A::default();
    *aggregate.audit_mut() = log;

    let records = aggregate.audit().records().to_vec();
    aggregate.audit_mut().set_replaying(true);
    for record in records.iter().filter(|r| r.accepted) {
        if let Err(err) = aggregate.replay(record) {
            aggregate.audit_mut().set_replaying(false);
            return Err(HydrateError {
                message: err.to_string(),
            });
        }
    }
    aggregate.audit_mut().set_replaying(false);

    Ok(aggregate)
}
