use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use kestrel_core::{InvocationId, Outcome};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// What happened during one dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// The invocation this record describes
    pub invocation_id: InvocationId,

    /// Name of the target
    pub target: String,

    /// Outcome, if the chain produced one
    pub outcome: Option<Outcome>,

    /// Error text, if the chain failed
    pub error: Option<String>,

    /// Number of interceptors entered
    pub interceptors_entered: usize,

    /// Whether the terminal operation was reached
    pub terminal_invoked: bool,

    /// When the dispatch finished
    pub timestamp: DateTime<Utc>,
}

impl DispatchRecord {
    /// Whether the dispatch produced an outcome.
    pub fn is_success(&self) -> bool {
        self.outcome.is_some()
    }

    /// Whether an interceptor answered without reaching the terminal
    /// operation.
    pub fn was_short_circuited(&self) -> bool {
        self.outcome.is_some() && !self.terminal_invoked
    }
}

/// A thread-safe, bounded log of dispatch records. The oldest records are
/// dropped first.
pub struct AuditLog {
    entries: RwLock<VecDeque<DispatchRecord>>,
    capacity: usize,
}

impl AuditLog {
    /// Creates a log keeping at most `capacity` records.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Appends a record.
    pub fn record(&self, record: DispatchRecord) {
        let mut entries = self.entries.write();
        entries.push_back(record);
        while entries.len() > self.capacity {
            entries.pop_front();
        }
    }

    /// All records, oldest first.
    pub fn entries(&self) -> Vec<DispatchRecord> {
        self.entries.read().iter().cloned().collect()
    }

    /// Records for the named target, oldest first.
    pub fn for_target(&self, target: &str) -> Vec<DispatchRecord> {
        self.entries
            .read()
            .iter()
            .filter(|r| r.target == target)
            .cloned()
            .collect()
    }

    /// The most recent record.
    pub fn last(&self) -> Option<DispatchRecord> {
        self.entries.read().back().cloned()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if no records are held.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drops all records.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Maximum number of records kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
