//! CSV report serialization
//!
//! Column layout depends on the run mode: `count` mode carries the exact
//! workspace count (with a `-1` sentinel on error rows), `empty-only` mode
//! only carries the has-workspaces flag.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::audit::{Mode, ReportRow};
use crate::error::Result;

/// Timestamped default report filename in the working directory.
pub fn default_report_path() -> PathBuf {
    PathBuf::from(format!(
        "workspace_report_{}.csv",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}

/// Write the finished row set to `path`.
pub fn write_report(path: &Path, rows: &[ReportRow], mode: Mode) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    match mode {
        Mode::Count => {
            writer.write_record(["org", "created_at", "workspace_count", "has_workspaces", "error"])?;
            for row in rows {
                let created_at = created_at_field(row);
                let count = row.workspace_count().to_string();
                let has_workspaces = has_workspaces_field(row);
                writer.write_record([
                    row.org.as_str(),
                    created_at.as_str(),
                    count.as_str(),
                    has_workspaces.as_str(),
                    row.outcome.error_message().unwrap_or(""),
                ])?;
            }
        }
        Mode::EmptyOnly => {
            writer.write_record(["org", "created_at", "has_workspaces", "error"])?;
            for row in rows {
                let created_at = created_at_field(row);
                let has_workspaces = has_workspaces_field(row);
                writer.write_record([
                    row.org.as_str(),
                    created_at.as_str(),
                    has_workspaces.as_str(),
                    row.outcome.error_message().unwrap_or(""),
                ])?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

fn created_at_field(row: &ReportRow) -> String {
    row.created_at
        .map(|ts| ts.to_rfc3339())
        .unwrap_or_default()
}

fn has_workspaces_field(row: &ReportRow) -> String {
    match row.outcome.has_workspaces() {
        Some(true) => "True".to_string(),
        Some(false) => "False".to_string(),
        None => String::new(),
    }
}
