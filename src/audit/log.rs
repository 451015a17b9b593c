use serde::{Deserialize, Serialize};

use super::record::TransitionRecord;

/// Append-only audit trail for a single state machine.
///
/// Owns the identity, the ordered transition records, and the bookkeeping a
/// store needs to tell new records from already-persisted ones. While
/// `replaying` is set, `record`/`record_rejected` are no-ops so commands can
/// be re-run against historical records without duplicating them.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuditLog {
    id: String,
    version: u64,
    records: Vec<TransitionRecord>,
    #[serde(skip, default)]
    replaying: bool,
    #[serde(skip, default)]
    committed_version: u64,
}

impl Default for AuditLog {
    fn default() -> Self {
        AuditLog {
            id: String::new(),
            version: 0,
            records: Vec::new(),
            replaying: false,
            committed_version: 0,
        }
    }
}

impl AuditLog {
    pub fn new() -> Self {
        AuditLog::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        let mut log = AuditLog::default();
        log.id = id.into();
        log
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn committed_version(&self) -> u64 {
        self.committed_version
    }

    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// Records added since the log was loaded (not yet persisted).
    pub fn new_records(&self) -> &[TransitionRecord] {
        &self.records[self.committed_version as usize..]
    }

    /// Mark all current records as persisted. Called by the store after a
    /// successful commit.
    pub fn mark_committed(&mut self) {
        self.committed_version = self.version;
    }

    /// Record an accepted transition with a serializable payload.
    pub fn record<T: serde::Serialize>(&mut self, name: impl Into<String>, payload: &T) {
        if self.replaying {
            return;
        }
        let bytes = bitcode::serialize(payload).expect("failed to serialize payload");
        let sequence = self.records.len() as u64 + 1;
        self.records.push(TransitionRecord::new(name, bytes, sequence));
        self.version = self.records.len() as u64;
    }

    /// Record a transition attempt the state machine refused. The refusal
    /// reason becomes the payload; the record is skipped on replay.
    pub fn record_rejected(&mut self, name: impl Into<String>, reason: &str) {
        if self.replaying {
            return;
        }
        let bytes = bitcode::serialize(&reason).expect("failed to serialize payload");
        let sequence = self.records.len() as u64 + 1;
        self.records
            .push(TransitionRecord::rejected(name, bytes, sequence));
        self.version = self.records.len() as u64;
    }

    pub fn load_from_history(&mut self, history: Vec<TransitionRecord>) {
        self.records = history;
        self.version = self.records.len() as u64;
        self.committed_version = self.version;
    }

    pub fn is_replaying(&self) -> bool {
        self.replaying
    }

    pub fn set_replaying(&mut self, replaying: bool) {
        self.replaying = replaying;
    }

    /// Apply a closure to every accepted record in sequence order. The log is
    /// marked as replaying for the duration, so commands invoked from the
    /// closure do not append duplicate records.
    pub fn rehydrate<F, E>(&mut self, mut apply: F) -> Result<(), E>
    where
        F: FnMut(&TransitionRecord) -> Result<(), E>,
    {
        self.replaying = true;
        for record in &self.records {
            if !record.accepted {
                continue;
            }
            if let Err(err) = apply(record) {
                self.replaying = false;
                return Err(err);
            }
        }
        self.replaying = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new() {
        let log = AuditLog::new();
        assert_eq!(log.id(), "");
        assert_eq!(log.version(), 0);
        assert!(log.records().is_empty());
        assert!(!log.is_replaying());
        assert_eq!(log.committed_version(), 0);
    }

    #[test]
    fn record() {
        let mut log = AuditLog::with_id("ord-1");
        log.record("OrderPlaced", &("c-1", 15000u64));

        assert_eq!(log.version(), 1);
        assert_eq!(log.records().len(), 1);
        assert_eq!(log.records()[0].name, "OrderPlaced");
        assert_eq!(log.records()[0].sequence, 1);
        assert!(log.records()[0].accepted);
        let decoded: (String, u64) = log.records()[0].decode().unwrap();
        assert_eq!(decoded, ("c-1".to_string(), 15000));
    }

    #[test]
    fn record_rejected_counts_toward_version() {
        let mut log = AuditLog::new();
        log.record("OrderPlaced", &());
        log.record_rejected("PaymentAccepted", "order is PAYMENT_FAILED");

        assert_eq!(log.version(), 2);
        assert!(!log.records()[1].accepted);
        let reason: String = log.records()[1].decode().unwrap();
        assert_eq!(reason, "order is PAYMENT_FAILED");
    }

    #[test]
    fn replaying_blocks_appends() {
        let mut log = AuditLog::new();
        log.set_replaying(true);
        log.record("OrderPlaced", &());
        log.record_rejected("PaymentAccepted", "nope");
        assert!(log.records().is_empty());
    }

    #[test]
    fn rehydrate_skips_rejected_records() {
        let mut log = AuditLog::new();
        log.record("OrderPlaced", &());
        log.record_rejected("PaymentAccepted", "too early");
        log.record("PaymentAccepted", &());

        let mut replayed = Vec::new();
        log.rehydrate(|record| {
            replayed.push(record.name.clone());
            Ok::<(), ()>(())
        })
        .unwrap();

        assert_eq!(replayed, vec!["OrderPlaced", "PaymentAccepted"]);
        assert!(!log.is_replaying());
    }

    #[test]
    fn rehydrate_resets_flag_on_error() {
        let mut log = AuditLog::new();
        log.record("OrderPlaced", &());

        let result = log.rehydrate(|_| Err("boom"));
        assert_eq!(result, Err("boom"));
        assert!(!log.is_replaying());
    }

    #[test]
    fn load_from_history_sets_committed_version() {
        let mut source = AuditLog::new();
        source.record("OrderPlaced", &());
        source.record("PaymentAccepted", &());

        let mut log = AuditLog::new();
        log.load_from_history(source.records().to_vec());
        assert_eq!(log.version(), 2);
        assert_eq!(log.committed_version(), 2);
        assert!(log.new_records().is_empty());
    }

    #[test]
    fn new_records_after_load_and_record() {
        let mut source = AuditLog::new();
        source.record("OrderPlaced", &());

        let mut log = AuditLog::new();
        log.load_from_history(source.records().to_vec());
        log.record("PaymentDeclined", &"card expired");

        assert_eq!(log.new_records().len(), 1);
        assert_eq!(log.new_records()[0].name, "PaymentDeclined");

        log.mark_committed();
        assert!(log.new_records().is_empty());
        assert_eq!(log.committed_version(), 2);
    }

    #[test]
    fn serialize_deserialize() {
        let mut log = AuditLog::with_id("ord-9");
        log.record("OrderPlaced", &"c-1");

        let json = serde_json::to_string(&log).unwrap();
        let back: AuditLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), "ord-9");
        assert_eq!(back.version(), 1);
        assert_eq!(back.records(), log.records());
        // committed_version is serde(skip) — defaults to 0 after a round trip
        assert_eq!(back.committed_version(), 0);
    }
}
