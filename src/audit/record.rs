use std::fmt;
use std::time::SystemTime;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Error when deserializing a transition payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayloadError {
    pub message: String,
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "payload error: {}", self.message)
    }
}

impl std::error::Error for PayloadError {}

/// One entry in an order's audit trail.
///
/// Every transition *attempt* is recorded, including attempts the state
/// machine refused (`accepted == false`). Rejected records carry the refusal
/// reason as their payload and are skipped on replay, so hydrating an order
/// only applies the transitions that actually happened while reconciliation
/// still sees the full history.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct TransitionRecord {
    pub name: String,
    #[serde(with = "payload_serde")]
    pub payload: Vec<u8>,
    pub sequence: u64,
    pub timestamp: SystemTime,
    pub accepted: bool,
}

mod payload_serde {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(payload: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        STANDARD.encode(payload).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

impl TransitionRecord {
    pub fn new(name: impl Into<String>, payload: Vec<u8>, sequence: u64) -> Self {
        TransitionRecord {
            name: name.into(),
            payload,
            sequence,
            timestamp: SystemTime::now(),
            accepted: true,
        }
    }

    /// Create a record for a refused transition attempt.
    pub fn rejected(name: impl Into<String>, payload: Vec<u8>, sequence: u64) -> Self {
        TransitionRecord {
            name: name.into(),
            payload,
            sequence,
            timestamp: SystemTime::now(),
            accepted: false,
        }
    }

    /// Deserialize the payload into the specified type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, PayloadError> {
        bitcode::deserialize(&self.payload).map_err(|e| PayloadError {
            message: e.to_string(),
        })
    }

    pub fn payload_bytes(&self) -> &[u8] {
        &self.payload
    }
}
