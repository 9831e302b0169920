//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;

use scrapedeck_core::{Company, CompanyId, Snapshot};

use crate::screen::ScreenId;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Pending confirmation action.
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    /// Batch-delete the given records.
    DeleteSelected { ids: Vec<String> },
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteSelected { ids } => {
                write!(f, "Delete {} record(s)? This cannot be undone.", ids.len())
            }
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),

    // ── Collection data ───────────────────────────────────────────
    /// Request a fresh fetch of the collection.
    Refresh,
    /// A fetch completed; snapshot already went through the store's
    /// generation guard.
    CompaniesLoaded(Snapshot),
    /// A fetch failed. The list keeps stale data if it has any.
    CompaniesLoadFailed(String),

    // ── Search ────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    /// Live keystroke echo (status bar only -- not yet committed).
    SearchInput(String),
    /// Debounce elapsed; the engine applies the term now.
    SearchCommitted(String),

    // ── Delete ────────────────────────────────────────────────────
    DeleteFinished { removed: usize },

    // ── Detail ────────────────────────────────────────────────────
    OpenDetail(CompanyId),
    DetailLoaded(Box<Company>),
    DetailFailed(String),
    CloseDetail,

    // ── Scrape flow ───────────────────────────────────────────────
    SubmitScrape(String),
    ScrapeFinished(Box<Company>),
    ScrapeFailed(String),
    RequestSaveScraped(Box<Company>),
    SaveFinished,
    SaveFailed(String),

    // ── Export ────────────────────────────────────────────────────
    RequestExport,

    // ── Confirm Dialog ────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}
