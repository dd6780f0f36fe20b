//! Audit sink abstraction.
//!
//! A sink receives the change records of one commit, in commit order. It is
//! the last step of a commit: the in-memory state has already changed, so a
//! sink error is reported but never rolls anything back.

use std::sync::Arc;

use thiserror::Error;

use crate::record::ChangeRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuditError {
    /// A sink's internal lock was poisoned by a panicking writer.
    #[error("audit log lock poisoned")]
    Poisoned,

    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
}

/// Destination for change records.
///
/// `Send + Sync` so a desk can be shared across threads.
pub trait AuditSink: Send + Sync {
    fn record(&self, record: ChangeRecord) -> Result<(), AuditError>;
}

impl<S> AuditSink for Arc<S>
where
    S: AuditSink + ?Sized,
{
    fn record(&self, record: ChangeRecord) -> Result<(), AuditError> {
        (**self).record(record)
    }
}

impl<S> AuditSink for Box<S>
where
    S: AuditSink + ?Sized,
{
    fn record(&self, record: ChangeRecord) -> Result<(), AuditError> {
        (**self).record(record)
    }
}

/// Writes each record as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: ChangeRecord) -> Result<(), AuditError> {
        let params = serde_json::Value::Array(record.params());
        tracing::info!(
            target: "staysync::audit",
            table = %record.table,
            action = ?record.action,
            statement = %record.statement(),
            params = %params,
            "change recorded"
        );
        Ok(())
    }
}
