//! In-memory audit log for tests/dev.

use std::sync::Mutex;

use crate::record::ChangeRecord;
use crate::sink::{AuditError, AuditSink};

/// Append-only log kept behind a mutex.
///
/// - No IO
/// - Records are kept in arrival order
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    records: Mutex<Vec<ChangeRecord>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far. Empty if the lock is poisoned.
    pub fn records(&self) -> Vec<ChangeRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Rendered statements, oldest first.
    pub fn statements(&self) -> Vec<String> {
        self.records().iter().map(ChangeRecord::statement).collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain the log, returning what it held.
    pub fn take(&self) -> Vec<ChangeRecord> {
        self.records
            .lock()
            .map(|mut records| std::mem::take(&mut *records))
            .unwrap_or_default()
    }
}

impl AuditSink for InMemoryAuditLog {
    fn record(&self, record: ChangeRecord) -> Result<(), AuditError> {
        let mut records = self.records.lock().map_err(|_| AuditError::Poisoned)?;
        records.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{AuditTable, ChangeKey};
    use std::sync::Arc;

    #[test]
    fn keeps_arrival_order() {
        let log = InMemoryAuditLog::new();
        log.record(ChangeRecord::delete_all(AuditTable::MasterItem)).unwrap();
        log.record(ChangeRecord::insert(AuditTable::MasterItem).with("id", "s1"))
            .unwrap();
        assert_eq!(
            log.statements(),
            vec![
                "DELETE FROM MasterItem".to_string(),
                "INSERT INTO MasterItem (id) VALUES (?)".to_string(),
            ]
        );
    }

    #[test]
    fn shared_through_arc() {
        let log = Arc::new(InMemoryAuditLog::new());
        let sink: Arc<dyn AuditSink> = log.clone();
        sink.record(ChangeRecord::delete(AuditTable::Rooms, ChangeKey::new("id", "101")))
            .unwrap();
        assert_eq!(log.len(), 1);

        let drained = log.take();
        assert_eq!(drained.len(), 1);
        assert!(log.is_empty());
    }
}
