//! Single-organization workspace probe
//!
//! One lean query per organization: `empty-only` mode asks for a single
//! workspace and checks whether the data array came back empty; `count`
//! mode reads the exact total from the pagination metadata. All failures
//! resolve to a `ProbeOutcome` value so one organization can never abort
//! the run.

use log::{error, info};

use super::{Mode, ProbeOutcome};
use crate::client::TfeApi;
use crate::error::Error;

/// Probe one organization for workspace presence/count.
pub async fn probe<C: TfeApi + ?Sized>(client: &C, org_id: &str, mode: Mode) -> ProbeOutcome {
    info!("Checking workspaces for org: {}", org_id);

    // A page size of 1 minimizes the payload when only presence matters;
    // count mode still needs just one page for the total-count metadata.
    let page_size = match mode {
        Mode::EmptyOnly => 1,
        Mode::Count => 20,
    };

    let page = match client.list_workspaces(org_id, 1, page_size).await {
        Ok(page) => page,
        Err(err) => return classify_failure(org_id, err),
    };

    let outcome = match mode {
        Mode::EmptyOnly => {
            if page.data.is_empty() {
                ProbeOutcome::Empty
            } else {
                ProbeOutcome::Active(None)
            }
        }
        Mode::Count => match page.total_count() {
            Some(0) => ProbeOutcome::Empty,
            Some(total) => ProbeOutcome::Active(Some(total)),
            None => {
                return classify_failure(
                    org_id,
                    crate::error::ApiError::InvalidResponse(
                        "workspace listing missing pagination total-count".to_string(),
                    )
                    .into(),
                );
            }
        },
    };

    match &outcome {
        ProbeOutcome::Active(Some(count)) => {
            info!("Organization {} has {} workspaces", org_id, count)
        }
        ProbeOutcome::Active(None) => info!("Organization {} has workspaces", org_id),
        ProbeOutcome::Empty => info!("Organization {} has no workspaces", org_id),
        _ => unreachable!("error outcomes classified above"),
    }

    outcome
}

fn classify_failure(org_id: &str, err: Error) -> ProbeOutcome {
    let message = err.to_string();
    error!("Error checking workspaces for org {}: {}", org_id, message);

    match err {
        Error::Api(api_err) if api_err.is_not_found() => ProbeOutcome::NotFound(message),
        _ => ProbeOutcome::TransientError(message),
    }
}
