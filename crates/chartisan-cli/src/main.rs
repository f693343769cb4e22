//! chartisan entry point.
//!
//! Parses arguments, loads configuration, selects the data source, and
//! runs the sequential batch. Exit codes: 0 for a clean run, 3 when any
//! instrument was skipped, per-error codes for run-level failures.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chartisan_core::{ReqwestHttpClient, YahooAdapter};

mod cli;
mod config;
mod error;
mod render;
mod runner;

use cli::Cli;
use error::CliError;

/// Exit code when at least one instrument was skipped.
const EXIT_PARTIAL: u8 = 3;

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    let config = config::load(&cli.config)?;
    let instruments = runner::select_instruments(&config, cli.ticker.as_deref())?;

    let adapter = if cli.mock {
        info!("using deterministic offline data source");
        YahooAdapter::default()
    } else {
        YahooAdapter::with_http_client(Arc::new(ReqwestHttpClient::new()))
    };

    let report = runner::run_batch(
        &adapter,
        &config,
        &instruments,
        &cli.out_dir,
        !cli.no_open,
    )
    .await;

    info!(
        generated = report.generated.len(),
        skipped = report.skipped.len(),
        "run complete"
    );

    if report.any_skipped() {
        return Ok(ExitCode::from(EXIT_PARTIAL));
    }
    Ok(ExitCode::SUCCESS)
}
