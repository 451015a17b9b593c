use std::fmt;
use std::sync::{Arc, Mutex};

/// Error from a failed event publish. Publish failures are not compensated
/// by the orchestrator — they propagate to the caller as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishError {
    pub message: String,
}

impl PublishError {
    pub fn new(message: impl Into<String>) -> Self {
        PublishError {
            message: message.into(),
        }
    }
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event publish failed: {}", self.message)
    }
}

impl std::error::Error for PublishError {}

/// Outbound event transport. Payloads are JSON bytes; delivery is
/// synchronous and assumed at-least-once by downstream consumers.
pub trait EventPublisher {
    fn publish(&self, topic: &str, key: &str, payload: &[u8]) -> Result<(), PublishError>;
}

/// Publisher that writes events to the log facade, or to a shared buffer
/// when one is attached.
pub struct LogPublisher {
    buffer: Option<Arc<Mutex<Vec<String>>>>,
}

impl Default for LogPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl LogPublisher {
    pub fn new() -> Self {
        LogPublisher { buffer: None }
    }

    pub fn with_buffer(buffer: Arc<Mutex<Vec<String>>>) -> Self {
        LogPublisher {
            buffer: Some(buffer),
        }
    }
}

impl EventPublisher for LogPublisher {
    fn publish(&self, topic: &str, key: &str, payload: &[u8]) -> Result<(), PublishError> {
        let line = format!("{} {} {}", topic, key, String::from_utf8_lossy(payload));
        if let Some(buffer) = &self.buffer {
            let mut buffer = buffer
                .lock()
                .map_err(|_| PublishError::new("publish buffer poisoned"))?;
            buffer.push(line);
        } else {
            log::info!(target: "orderflow::events", "{}", line);
        }
        Ok(())
    }
}
