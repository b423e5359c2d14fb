//! Top-level audit command
//!
//! Wires the collaborators together: load config, acquire the admin token,
//! resolve the organization set, dispatch the probes, then write the CSV
//! report and print the run summary.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use colored::Colorize;
use log::{debug, info, warn};

use crate::audit::{self, Mode, RunSummary};
use crate::client::{list_all_orgs, OrgRef, TfeApi, TfeClient};
use crate::config::Config;
use crate::error::Result;
use crate::output::{default_report_path, write_report};

use super::Cli;

/// Environment variable holding the TFE admin token.
const TOKEN_ENV_VAR: &str = "TFE_ADMIN_TOKEN";

/// Execute the audit end to end.
pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load_from(&cli.config)?;
    let token = acquire_token()?;
    let client = Arc::new(TfeClient::new(config.tfe_url(), token)?);

    let started = Instant::now();

    let orgs = resolve_orgs(cli.orgs.as_deref(), &config, client.as_ref()).await?;
    info!("Found {} orgs", orgs.len());
    debug!(
        "Orgs: {:?}",
        orgs.iter().map(|o| o.id.as_str()).collect::<Vec<_>>()
    );

    let total = orgs.len();
    let rows = audit::run_all(client, orgs, cli.mode, cli.max_workers as usize).await;

    if rows.is_empty() {
        info!("No report rows collected, skipping CSV report");
    } else {
        let report_path = cli.output.unwrap_or_else(default_report_path);
        write_report(&report_path, &rows, cli.mode)?;
        info!("CSV report written to {}", report_path.display());
    }

    let summary = audit::summarize(&rows, total);
    print_summary(&summary, cli.mode);

    let runtime = started.elapsed().as_secs_f64();
    info!(
        "Total runtime: {:.2} seconds ({:.2} minutes)",
        runtime,
        runtime / 60.0
    );

    Ok(())
}

/// Read the admin token from the environment, prompting securely if unset.
fn acquire_token() -> Result<String> {
    if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
        if !token.is_empty() {
            return Ok(token);
        }
    }

    let token = dialoguer::Password::new()
        .with_prompt("Enter your admin token")
        .interact()?;
    Ok(token)
}

/// Determine the organization set for this run.
///
/// Precedence: `--orgs` (file of names or comma-separated list) → config
/// `organizations` key → full paginated listing of the instance.
/// Explicitly-named orgs get a best-effort metadata lookup for their
/// creation timestamp.
async fn resolve_orgs<C: TfeApi>(
    orgs_arg: Option<&str>,
    config: &Config,
    client: &C,
) -> Result<Vec<OrgRef>> {
    let names = match orgs_arg {
        Some(value) => Some(parse_orgs_arg(value)?),
        None => config.organizations.clone(),
    };

    match names {
        Some(names) => {
            let mut orgs = Vec::with_capacity(names.len());
            for name in names {
                orgs.push(fetch_org_metadata(client, &name).await);
            }
            Ok(orgs)
        }
        None => Ok(list_all_orgs(client).await),
    }
}

/// Interpret the `--orgs` value: a path to a file with one org name per
/// line, or a comma-separated list.
fn parse_orgs_arg(value: &str) -> Result<Vec<String>> {
    let path = Path::new(value);
    if path.is_file() {
        let contents = std::fs::read_to_string(path)?;
        Ok(contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    } else {
        Ok(value
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect())
    }
}

/// Look up an explicitly-named org's creation timestamp. Lookup failure is
/// non-fatal: the org is still audited, just without a timestamp.
async fn fetch_org_metadata<C: TfeApi + ?Sized>(client: &C, org_id: &str) -> OrgRef {
    match client.get_organization(org_id).await {
        Ok(doc) => {
            let created_at = doc.data.attributes.and_then(|a| a.created_at);
            OrgRef::new(org_id, created_at)
        }
        Err(err) => {
            warn!("Could not fetch metadata for org '{}': {}", org_id, err);
            OrgRef::new(org_id, None)
        }
    }
}

/// Print the run summary banner.
fn print_summary(summary: &RunSummary, mode: Mode) {
    println!();
    println!(
        "{}",
        format!("==== WORKSPACE SUMMARY ({} MODE) ====", mode.as_str().to_uppercase()).bold()
    );
    println!("Total organizations processed: {}", summary.total);
    println!(
        "Organizations with workspaces: {} ({:.1}%)",
        summary.active.to_string().green(),
        summary.active_pct
    );
    println!(
        "Organizations with NO workspaces: {} ({:.1}%)",
        summary.empty.to_string().yellow(),
        summary.empty_pct
    );
    println!(
        "Organizations with errors: {} ({:.1}%)",
        summary.errors.to_string().red(),
        summary.error_pct
    );
}
