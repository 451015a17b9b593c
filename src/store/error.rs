use std::fmt;

use crate::audit::HydrateError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    LockPoisoned(&'static str),
    Replay(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned(operation) => {
                write!(f, "order store lock poisoned during {}", operation)
            }
            StoreError::Replay(message) => write!(f, "replay error: {}", message),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<HydrateError> for StoreError {
    fn from(err: HydrateError) -> Self {
        StoreError::Replay(err.message)
    }
}
