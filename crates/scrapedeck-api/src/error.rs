use thiserror::Error;

/// Top-level error type for the `scrapedeck-api` crate.
///
/// Covers every failure mode of the scraping service API surface.
/// `scrapedeck-core` maps these into user-facing diagnostics; callers
/// branch on the variant, never on message text.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Resources ───────────────────────────────────────────────────
    /// The requested record does not exist on the server.
    #[error("Company not found: {id}")]
    NotFound { id: String },

    // ── Scraping ────────────────────────────────────────────────────
    /// The remote scrape of the target site failed (bad URL, target
    /// unreachable, screenshot capture error).
    #[error("Scrape failed: {message}")]
    Upstream { message: String },

    // ── Generic API ─────────────────────────────────────────────────
    /// Any other non-2xx response from the service.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with a body preview for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error that might succeed on
    /// a manual retry (the client itself never retries).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
