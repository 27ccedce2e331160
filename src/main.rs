use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use smartsheet_bulkedit::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use smartsheet_bulkedit::commands::{self, Command};
use smartsheet_bulkedit::logging::{ServiceLog, StderrLogger};
use smartsheet_bulkedit::{BulkEditService, RestConfig};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Smartsheet API access token
    #[arg(long, env = "SMARTSHEET_ACCESS_TOKEN", hide_env_values = true)]
    token: String,

    /// API root URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Log each request and skipped sheet
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, short = 'j', global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    StderrLogger::init(level).context("Failed to install logger")?;

    let config = RestConfig {
        base_url: cli.base_url,
        token: cli.token,
        timeout: Duration::from_secs(cli.timeout),
    };
    let service = BulkEditService::with_config(config, ServiceLog::global())
        .context("Unable to connect to Smartsheet")?;

    if !commands::execute(&service, cli.command, cli.json)? {
        std::process::exit(1);
    }

    Ok(())
}
