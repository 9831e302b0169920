//! Pagination number strip: which page buttons to show, with ellipses.
//!
//! At most seven entries are ever visible. All pages fit when the total
//! is small; otherwise the strip keeps the first page, the last page, and
//! a window around the current page, eliding the rest.

use ratatui::text::{Line, Span};

use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    Page(usize),
    Ellipsis,
}

/// Compute the visible entries for `current` of `total` pages (1-based).
pub fn page_entries(current: usize, total: usize) -> Vec<PageEntry> {
    const MAX_VISIBLE: usize = 7;

    let mut entries = Vec::new();
    if total <= MAX_VISIBLE {
        entries.extend((1..=total).map(PageEntry::Page));
        return entries;
    }

    // Always show the first page.
    entries.push(PageEntry::Page(1));

    if current <= 3 {
        // Near the start: 1 2 3 4 … N
        entries.extend((2..=4).map(PageEntry::Page));
        entries.push(PageEntry::Ellipsis);
        entries.push(PageEntry::Page(total));
    } else if current >= total - 2 {
        // Near the end: 1 … N-3 N-2 N-1 N
        entries.push(PageEntry::Ellipsis);
        entries.extend((total - 3..=total).map(PageEntry::Page));
    } else {
        // In the middle: 1 … p-1 p p+1 … N
        entries.push(PageEntry::Ellipsis);
        entries.extend((current - 1..=current + 1).map(PageEntry::Page));
        entries.push(PageEntry::Ellipsis);
        entries.push(PageEntry::Page(total));
    }
    entries
}

/// Render the strip as a styled line, highlighting the current page.
pub fn render(current: usize, total: usize) -> Line<'static> {
    let mut spans = Vec::new();
    for entry in page_entries(current, total) {
        match entry {
            PageEntry::Page(n) if n == current => {
                spans.push(Span::styled(format!("[{n}]"), theme::tab_active()));
            }
            PageEntry::Page(n) => {
                spans.push(Span::styled(format!(" {n} "), theme::key_hint()));
            }
            PageEntry::Ellipsis => {
                spans.push(Span::styled(" … ", theme::key_hint()));
            }
        }
    }
    Line::from(spans)
}
