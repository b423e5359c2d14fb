//! CLI argument definitions

use std::path::PathBuf;

use clap::Parser;

use crate::audit::dispatch::DEFAULT_MAX_WORKERS;
use crate::audit::Mode;

pub mod run;

/// Audit workspace presence across TFE organizations
#[derive(Parser, Debug)]
#[command(name = "wsaudit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(long)]
    pub config: PathBuf,

    /// Comma-separated list of org names, or path to a file with one name
    /// per line. Defaults to the config's `organizations` key, else every
    /// org on the instance.
    #[arg(long)]
    pub orgs: Option<String>,

    /// Operation mode: 'count' gets exact workspace counts, 'empty-only'
    /// only identifies whether an org has any workspaces
    #[arg(long, value_enum, default_value = "count")]
    pub mode: Mode,

    /// Number of concurrent probe workers
    #[arg(long, default_value_t = DEFAULT_MAX_WORKERS as u16, value_parser = clap::value_parser!(u16).range(1..))]
    pub max_workers: u16,

    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: log::LevelFilter,

    /// Report output path (default: workspace_report_<timestamp>.csv)
    #[arg(long)]
    pub output: Option<PathBuf>,
}
