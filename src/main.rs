//! wsaudit - Workspace audit tool for Terraform Enterprise organizations

use clap::Parser;

mod audit;
mod cli;
mod client;
mod config;
mod error;
mod output;

#[tokio::main]
async fn main() {
    let args = cli::Cli::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .parse_default_env()
        .init();

    if let Err(err) = cli::run::run(args).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
