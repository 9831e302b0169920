//! Screen identifiers and cycling order.

use std::fmt;

/// The two top-level screens: the scrape view and the company list
/// (which hosts the detail panel as an overlay).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Scrape,
    Companies,
}

impl ScreenId {
    pub const ALL: [Self; 2] = [Self::Scrape, Self::Companies];

    pub fn label(self) -> &'static str {
        match self {
            Self::Scrape => "Scrape",
            Self::Companies => "Companies",
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::Scrape => 1,
            Self::Companies => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Scrape),
            2 => Some(Self::Companies),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Scrape => Self::Companies,
            Self::Companies => Self::Scrape,
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
