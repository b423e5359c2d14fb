//! Thread-safe report buffer
//!
//! Append-only collection of report rows, shared across worker tasks. The
//! mutex serializes concurrent appends; rows land in completion order.

use std::sync::Mutex;

use super::ReportRow;

/// Shared buffer of per-organization report rows.
#[derive(Debug, Default)]
pub struct ReportBuffer {
    rows: Mutex<Vec<ReportRow>>,
}

impl ReportBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one row. Safe to call from any number of tasks.
    pub fn append(&self, row: ReportRow) {
        self.rows.lock().expect("report buffer poisoned").push(row);
    }

    /// Whether a row for the given organization was already recorded.
    pub fn contains(&self, org_id: &str) -> bool {
        self.rows
            .lock()
            .expect("report buffer poisoned")
            .iter()
            .any(|row| row.org == org_id)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().expect("report buffer poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take the full row set. Call only after all appends have completed.
    pub fn into_rows(self) -> Vec<ReportRow> {
        self.rows.into_inner().expect("report buffer poisoned")
    }
}
