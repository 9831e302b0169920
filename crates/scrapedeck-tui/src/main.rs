//! `scrapedeck-tui` — terminal front-end for the website-scraping service.
//!
//! Built on [ratatui](https://ratatui.rs). Two screens: Scrape (submit a
//! URL, preview, save) and Companies (searchable, paginated, multi-select
//! list with a per-record detail panel).
//!
//! Logs are written to a file (default `/tmp/scrapedeck-tui.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app
//! launch.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use scrapedeck_core::ScrapeService;

use crate::app::App;

/// Terminal UI for browsing and managing scraped company records.
#[derive(Parser, Debug)]
#[command(name = "scrapedeck-tui", version, about)]
struct Cli {
    /// Scraping service base URL (overrides the config file)
    #[arg(short = 'u', long, env = "SCRAPEDECK_API_URL")]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "SCRAPEDECK_TIMEOUT")]
    timeout: Option<u64>,

    /// Log file path
    #[arg(long, default_value = "/tmp/scrapedeck-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "scrapedeck_tui={log_level},scrapedeck_core={log_level},scrapedeck_api={log_level}"
        ))
    });

    let log_dir = cli.log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("scrapedeck-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Build the service from flags layered over the config file.
fn build_service(cli: &Cli) -> Result<ScrapeService> {
    let config = scrapedeck_config::load_config_or_default();

    let api_url = cli
        .api_url
        .clone()
        .or(config.api_url)
        .ok_or_else(|| {
            eyre!(
                "no scraping service URL configured — pass --api-url, set \
                 SCRAPEDECK_API_URL, or run `scrapedeck config init`"
            )
        })?;
    let url = api_url
        .parse()
        .map_err(|e| eyre!("invalid API URL '{api_url}': {e}"))?;

    let timeout = Duration::from_secs(cli.timeout.unwrap_or(config.timeout));
    Ok(ScrapeService::connect(url, timeout)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let service = build_service(&cli)?;
    info!(url = %service.base_url(), "starting scrapedeck-tui");

    let mut app = App::new(service);
    app.run().await?;

    Ok(())
}
