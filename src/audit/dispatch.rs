//! Concurrent probe dispatcher
//!
//! Fans the prober out over the organization set with a sliding window of
//! spawned tasks: seed up to `max_workers` tasks, then start one more each
//! time one finishes. Spawned tasks isolate panics, so a dying probe task
//! is logged and backfilled instead of taking the run down with it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use log::{error, info};

use super::{probe, Mode, ProbeOutcome, ReportBuffer, ReportRow};
use crate::client::{OrgRef, TfeApi};

/// Default worker-pool width.
pub const DEFAULT_MAX_WORKERS: usize = 5;

type TaskFuture = Pin<Box<dyn Future<Output = (OrgRef, std::result::Result<(), tokio::task::JoinError>)> + Send>>;

/// Probe every organization and return one report row per organization.
///
/// Rows land in completion order. The row count always equals the input
/// count: a task that fails outside the prober's own error handling gets a
/// synthetic `TransientError` row.
pub async fn run_all<C>(
    client: Arc<C>,
    orgs: Vec<OrgRef>,
    mode: Mode,
    max_workers: usize,
) -> Vec<ReportRow>
where
    C: TfeApi + 'static,
{
    let buffer = Arc::new(ReportBuffer::new());
    let total = orgs.len();
    let width = max_workers.max(1);

    let spawn_task = |org: OrgRef| -> TaskFuture {
        let client = Arc::clone(&client);
        let buffer = Arc::clone(&buffer);
        let task_org = org.clone();
        let handle = tokio::spawn(async move {
            let outcome = probe(client.as_ref(), &task_org.id, mode).await;
            buffer.append(ReportRow {
                org: task_org.id,
                created_at: task_org.created_at,
                outcome,
            });
        });
        Box::pin(async move { (org, handle.await) })
    };

    let mut pending = orgs.into_iter();
    let mut in_flight: FuturesUnordered<TaskFuture> = FuturesUnordered::new();

    for org in pending.by_ref().take(width) {
        in_flight.push(spawn_task(org));
    }

    let mut finished = 0usize;
    while let Some((org, joined)) = in_flight.next().await {
        finished += 1;
        match joined {
            Ok(()) => info!("[{}/{}] Finished processing org {}", finished, total, org.id),
            Err(err) => {
                error!(
                    "[{}/{}] Error processing org {}: {}",
                    finished, total, org.id, err
                );
                // Keep the one-row-per-org invariant even when the task
                // died before it could record its own outcome.
                if !buffer.contains(&org.id) {
                    buffer.append(ReportRow {
                        org: org.id,
                        created_at: org.created_at,
                        outcome: ProbeOutcome::TransientError(format!(
                            "probe task failed: {}",
                            err
                        )),
                    });
                }
            }
        }

        if let Some(next) = pending.next() {
            in_flight.push(spawn_task(next));
        }
    }

    Arc::try_unwrap(buffer)
        .expect("all probe tasks joined")
        .into_rows()
}
