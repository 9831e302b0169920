//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use scrapedeck_config::ConfigError;
use scrapedeck_core::CoreError;

/// Exit codes for scripting.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const SCRAPE: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the scraping service at {url}")]
    #[diagnostic(
        code(scrapedeck::connection_failed),
        help(
            "Check that the service is running and accessible.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(scrapedeck::timeout),
        help("Increase the timeout with --timeout or check service responsiveness.")
    )]
    Timeout,

    // ── Configuration ────────────────────────────────────────────────

    #[error("No scraping service URL configured")]
    #[diagnostic(
        code(scrapedeck::no_api_url),
        help(
            "Set one with: scrapedeck config init\n\
             Or pass --api-url / set SCRAPEDECK_API_URL."
        )
    )]
    NoApiUrl,

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(scrapedeck::validation))]
    Validation { field: String, reason: String },

    #[error("Configuration error")]
    #[diagnostic(code(scrapedeck::config))]
    Config(#[source] Box<dyn std::error::Error + Send + Sync>),

    // ── Resources ────────────────────────────────────────────────────

    #[error("Company '{id}' not found")]
    #[diagnostic(
        code(scrapedeck::not_found),
        help("Run: scrapedeck list to see stored companies")
    )]
    NotFound { id: String },

    // ── Scraping ─────────────────────────────────────────────────────

    #[error("Scrape failed: {message}")]
    #[diagnostic(
        code(scrapedeck::scrape_failed),
        help("Check that the URL is correct and the target site is reachable.")
    )]
    ScrapeFailed { message: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error: {message}")]
    #[diagnostic(code(scrapedeck::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::ScrapeFailed { .. } => exit_code::SCRAPE,
            Self::NoApiUrl | Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => Self::Timeout,

            CoreError::NotFound { id } => Self::NotFound { id },

            CoreError::ValidationFailed { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::ScrapeFailed { message } => Self::ScrapeFailed { message },

            CoreError::Api { message, status } => Self::ApiError { message, status },

            CoreError::Config { message } => Self::Config(message.into()),

            CoreError::Internal(message) => Self::ApiError {
                message,
                status: None,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoApiUrl => Self::NoApiUrl,
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(Box::new(other)),
        }
    }
}
