//! Audit log mirror.
//!
//! Committed changes are described as relational [`ChangeRecord`]s and handed
//! to an injected [`AuditSink`]. Sinks are best-effort: the desk logs and
//! swallows their errors so a failing mirror never blocks a commit.

pub mod in_memory;
pub mod record;
pub mod sink;

pub use in_memory::InMemoryAuditLog;
pub use record::{AuditTable, ChangeAction, ChangeKey, ChangeRecord, Column};
pub use sink::{AuditError, AuditSink, TracingAuditSink};
