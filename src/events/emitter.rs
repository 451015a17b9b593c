use std::sync::Mutex;

use event_emitter_rs::EventEmitter;

use super::publisher::{EventPublisher, PublishError};

/// Publisher that fans events out to in-process subscribers via an
/// `EventEmitter`. Listeners are keyed by topic; the publish key is not
/// used for in-process routing.
pub struct LocalEmitterPublisher {
    emitter: Mutex<EventEmitter>,
}

impl LocalEmitterPublisher {
    /// Wrap an emitter. Register listeners with `EventEmitter::on` before
    /// handing it over.
    pub fn new(emitter: EventEmitter) -> Self {
        LocalEmitterPublisher {
            emitter: Mutex::new(emitter),
        }
    }
}

impl EventPublisher for LocalEmitterPublisher {
    fn publish(&self, topic: &str, _key: &str, payload: &[u8]) -> Result<(), PublishError> {
        let payload = String::from_utf8_lossy(payload).into_owned();
        let handles = {
            let mut emitter = self
                .emitter
                .lock()
                .map_err(|_| PublishError::new("emitter lock poisoned"))?;
            emitter.emit(topic, payload)
        };
        // emit spawns one thread per listener; wait so delivery is
        // acknowledged before the saga continues
        for handle in handles {
            handle
                .join()
                .map_err(|_| PublishError::new("emitter listener panicked"))?;
        }
        Ok(())
    }
}
