//! Workspace audit engine
//!
//! Probes every selected organization for workspace presence over a bounded
//! worker pool and aggregates one report row per organization.

use chrono::{DateTime, Utc};
use clap::ValueEnum;

pub mod dispatch;
pub mod probe;
pub mod report;
pub mod summary;

pub use dispatch::run_all;
pub use probe::probe;
pub use report::ReportBuffer;
pub use summary::{summarize, RunSummary};

/// Operation mode, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Exact workspace count per organization
    Count,
    /// Existence check only, with the smallest possible response payload
    EmptyOnly,
}

impl Mode {
    /// Flag spelling, also used in the summary banner.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Count => "count",
            Mode::EmptyOnly => "empty-only",
        }
    }
}

/// Classified result of probing one organization.
///
/// Produced exactly once per organization; every failure path resolves to a
/// value here rather than an error that could abort the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Workspaces exist. The count is only known in `count` mode.
    Active(Option<u64>),
    /// Zero workspaces confirmed
    Empty,
    /// The organization does not exist on the instance
    NotFound(String),
    /// Probe failed after exhausting retries, or a non-404 API error
    TransientError(String),
}

impl ProbeOutcome {
    /// Whether this outcome counts as an error row in the report.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ProbeOutcome::NotFound(_) | ProbeOutcome::TransientError(_)
        )
    }

    /// Error detail for the report's error column, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ProbeOutcome::NotFound(msg) | ProbeOutcome::TransientError(msg) => Some(msg),
            _ => None,
        }
    }

    /// Workspace presence, unknown on error rows.
    pub fn has_workspaces(&self) -> Option<bool> {
        match self {
            ProbeOutcome::Active(_) => Some(true),
            ProbeOutcome::Empty => Some(false),
            _ => None,
        }
    }
}

/// One output record summarizing one organization's probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub org: String,
    pub created_at: Option<DateTime<Utc>>,
    pub outcome: ProbeOutcome,
}

impl ReportRow {
    /// Count column value for `count` mode: `-1` sentinel on error rows.
    pub fn workspace_count(&self) -> i64 {
        match &self.outcome {
            ProbeOutcome::Active(Some(n)) => *n as i64,
            ProbeOutcome::Active(None) => 1,
            ProbeOutcome::Empty => 0,
            _ => -1,
        }
    }
}
