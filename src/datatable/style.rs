//! Styling for the data-table controller.
//!
//! All defaults use `AdaptiveColor` light/dark pairs so the table reads
//! well on either terminal background.

use lipgloss_extras::prelude::*;

/// Ellipsis used when a cell is truncated to its column width.
pub const ELLIPSIS: &str = "…";

/// Styling configuration for every visual element of the table.
#[derive(Debug, Clone)]
pub struct TableStyles {
    /// Style for the table title.
    pub title: Style,
    /// Style for the header row.
    pub header: Style,
    /// Style for data cells.
    pub cell: Style,
    /// Style for the active-filter summary in the header.
    pub active_filter: Style,
    /// Style for the status line (row counts).
    pub status: Style,
    /// Style for the loading placeholder.
    pub loading: Style,
    /// Style for the fetch-error line.
    pub error: Style,
    /// Style for the "no rows" message.
    pub no_rows: Style,
    /// Container style for the page control.
    pub pagination: Style,
    /// Style for the key-hint line.
    pub help: Style,
}

impl Default for TableStyles {
    fn default() -> Self {
        let subdued = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };

        Self {
            title: Style::new()
                .bold(true)
                .foreground(AdaptiveColor {
                    Light: "#1a1a1a",
                    Dark: "#dddddd",
                }),
            header: Style::new().bold(true).underline(true),
            cell: Style::new(),
            active_filter: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
            status: Style::new().foreground(subdued.clone()),
            loading: Style::new().faint(true),
            error: Style::new().foreground(AdaptiveColor {
                Light: "#D70000",
                Dark: "#FF5F5F",
            }),
            no_rows: Style::new().foreground(subdued.clone()),
            pagination: Style::new().padding_left(2),
            help: Style::new().faint(true),
        }
    }
}
