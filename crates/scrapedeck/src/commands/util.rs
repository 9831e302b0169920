//! Shared helpers for command handlers.

use std::time::Duration;

use scrapedeck_config::Config;
use scrapedeck_core::ScrapeService;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Build a [`ScrapeService`] from global flags layered over the config file.
///
/// Precedence for the base URL: `--api-url` flag (or its env var, which
/// clap resolves) > config file. Timeout follows the same rule.
pub fn build_service(global: &GlobalOpts) -> Result<ScrapeService, CliError> {
    let config = scrapedeck_config::load_config_or_default();

    let effective = Config {
        api_url: global.api_url.clone().or_else(|| config.api_url.clone()),
        timeout: global.timeout.unwrap_or(config.timeout),
        ..config
    };

    let url = effective.api_url()?;
    Ok(ScrapeService::connect(
        url,
        Duration::from_secs(effective.timeout),
    )?)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
