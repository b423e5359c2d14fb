//! Run summary derivation

use super::{ProbeOutcome, ReportRow};

/// Aggregate statistics for a finished run. Derived once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub total: usize,
    pub active: usize,
    pub empty: usize,
    pub errors: usize,
    pub active_pct: f64,
    pub empty_pct: f64,
    pub error_pct: f64,
}

/// Summarize the finished row set.
///
/// Active = rows with workspaces, empty = confirmed zero-workspace rows,
/// errors = not-found plus transient failures. Percentages are of
/// `total_org_count` and all report 0 when it is 0.
pub fn summarize(rows: &[ReportRow], total_org_count: usize) -> RunSummary {
    let active = rows
        .iter()
        .filter(|r| matches!(r.outcome, ProbeOutcome::Active(_)))
        .count();
    let empty = rows
        .iter()
        .filter(|r| r.outcome == ProbeOutcome::Empty)
        .count();
    let errors = rows.iter().filter(|r| r.outcome.is_error()).count();

    let pct = |n: usize| {
        if total_org_count == 0 {
            0.0
        } else {
            (n as f64 / total_org_count as f64) * 100.0
        }
    };

    RunSummary {
        total: total_org_count,
        active,
        empty,
        errors,
        active_pct: pct(active),
        empty_pct: pct(empty),
        error_pct: pct(errors),
    }
}
