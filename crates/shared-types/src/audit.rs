//! Session-scoped audit log of completed analyses

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A single completed scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub filename: String,
    /// Completion time of day, `HH:MM:SS`
    pub time: String,
}

impl AuditLogEntry {
    pub fn new(filename: &str, at: NaiveTime) -> Self {
        Self {
            filename: filename.to_string(),
            time: at.format("%H:%M:%S").to_string(),
        }
    }
}

impl fmt::Display for AuditLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.filename, self.time)
    }
}

/// Append-only log for one session.
///
/// Entries are kept in submission order; `record` is the only mutation.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SessionLog {
    entries: Vec<AuditLogEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry for a successful analysis
    pub fn record(&mut self, filename: &str, at: NaiveTime) -> &AuditLogEntry {
        self.entries.push(AuditLogEntry::new(filename, at));
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[AuditLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display lines, oldest first
    pub fn summary(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.to_string()).collect()
    }
}
