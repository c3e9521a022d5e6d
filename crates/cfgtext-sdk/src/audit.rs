use std::sync::Mutex;

use cfgtext_types::NamespaceId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One applied text edit, as seen by the audit trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    pub namespace: NamespaceId,
    pub operator: String,
    pub env: String,
    pub at: DateTime<Utc>,
    /// Namespace revision after the edit.
    pub revision: u64,
    pub creates: usize,
    pub updates: usize,
    pub deletes: usize,
}

/// Receives a record for every applied change set.
///
/// Recording happens after the store committed; a sink cannot veto or roll
/// back an edit.
pub trait AuditSink: Send + Sync {
    fn record(&self, record: &AuditRecord);
}

pub struct NoOpAudit;

impl AuditSink for NoOpAudit {
    fn record(&self, _record: &AuditRecord) {}
}

/// Emits every record as a structured `tracing` event.
pub struct TracingAudit;

impl AuditSink for TracingAudit {
    fn record(&self, record: &AuditRecord) {
        tracing::info!(
            audit_id = %record.id,
            namespace = %record.namespace,
            operator = %record.operator,
            env = %record.env,
            revision = record.revision,
            creates = record.creates,
            updates = record.updates,
            deletes = record.deletes,
            "config text applied"
        );
    }
}

/// Keeps records in memory, for tests and embedding.
#[derive(Default)]
pub struct MemoryAudit {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().expect("lock poisoned").clone()
    }
}

impl AuditSink for MemoryAudit {
    fn record(&self, record: &AuditRecord) {
        self.records
            .lock()
            .expect("lock poisoned")
            .push(record.clone());
    }
}
