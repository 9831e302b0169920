//! `scrapedeck` -- command-line client for the website-scraping service.
//!
//! Entry point: argument parsing, tracing setup, command dispatch, and
//! exit-code mapping. All real work happens in `commands/`.

mod cli;
mod commands;
mod error;
mod output;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Stderr tracing, gated by `-v` count (errors only by default).
fn setup_tracing(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("scrapedeck={level},scrapedeck_core={level},scrapedeck_api={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List(args) => commands::companies::list(args, &cli.global).await,
        Command::Get { id } => commands::companies::get(&id, &cli.global).await,
        Command::Scrape(args) => commands::scrape::handle(args, &cli.global).await,
        Command::Delete { ids } => commands::companies::delete(ids, &cli.global).await,
        Command::Export { out } => commands::companies::export(out, &cli.global).await,
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_owned();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
