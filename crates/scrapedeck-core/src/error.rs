// ── Core error types ──
//
// User-facing errors from scrapedeck-core. These are NOT transport
// specific -- consumers never see raw HTTP status codes or JSON parse
// failures. The `From<scrapedeck_api::Error>` impl translates gateway
// errors into domain-appropriate variants that callers branch on.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the scraping service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Company not found: {id}")]
    NotFound { id: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    /// The remote scrape of the target site itself failed.
    #[error("Scrape failed: {message}")]
    ScrapeFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from gateway errors ───────────────────────────────────

impl From<scrapedeck_api::Error> for CoreError {
    fn from(err: scrapedeck_api::Error) -> Self {
        match err {
            scrapedeck_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    Self::Timeout
                } else if e.is_connect() {
                    Self::ConnectionFailed {
                        url: e
                            .url()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    Self::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            scrapedeck_api::Error::InvalidUrl(e) => Self::ValidationFailed {
                message: format!("invalid URL: {e}"),
            },
            scrapedeck_api::Error::NotFound { id } => Self::NotFound { id },
            scrapedeck_api::Error::Upstream { message } => Self::ScrapeFailed { message },
            scrapedeck_api::Error::Api { status, message } => Self::Api {
                message,
                status: Some(status),
            },
            scrapedeck_api::Error::Deserialization { message, body: _ } => {
                Self::Internal(format!("deserialization error: {message}"))
            }
        }
    }
}
