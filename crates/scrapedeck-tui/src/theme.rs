//! Indigo Bloom palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const INDIGO: Color = Color::Rgb(129, 140, 248); // #818cf8
pub const VIOLET: Color = Color::Rgb(192, 132, 252); // #c084fc
pub const PINK: Color = Color::Rgb(244, 114, 182); // #f472b6
pub const AMBER: Color = Color::Rgb(251, 191, 36); // #fbbf24
pub const SUCCESS_GREEN: Color = Color::Rgb(52, 211, 153); // #34d399
pub const ERROR_RED: Color = Color::Rgb(248, 113, 113); // #f87171

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(199, 202, 209); // #c7cad1
pub const BORDER_GRAY: Color = Color::Rgb(91, 96, 120); // #5b6078
pub const BG_HIGHLIGHT: Color = Color::Rgb(49, 50, 68); // #313244
pub const BG_DARK: Color = Color::Rgb(30, 30, 46); // #1e1e2e

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(INDIGO).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(VIOLET)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(INDIGO)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Cursor / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(VIOLET)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default().fg(VIOLET).add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(INDIGO).add_modifier(Modifier::BOLD)
}
