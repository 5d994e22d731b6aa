//! Key bindings for data-table interaction.
//!
//! ## Browsing
//!
//! - **Pages**: `←/h` previous, `→/l` next, `g/home` first, `G/end` last
//! - **Filter**: `/` edit the active filter, `tab` switch filter field,
//!   `esc` clear the filter
//! - **Data**: `s` cycle the column sort, `p` cycle the page size,
//!   `r` refetch the current window
//!
//! ## While editing a filter
//!
//! - `enter` applies, `esc` leaves the editor, `ctrl+u` clears the range

use crate::key;
use crossterm::event::{KeyCode, KeyModifiers};

/// Key bindings for the table controller.
#[derive(Debug, Clone)]
pub struct TableKeyMap {
    /// Go to the previous page.
    pub prev_page: key::Binding,
    /// Go to the next page.
    pub next_page: key::Binding,
    /// Jump to the first page.
    pub first_page: key::Binding,
    /// Jump to the last page.
    pub last_page: key::Binding,
    /// Start editing the active filter field.
    pub filter: key::Binding,
    /// Switch the filter to the next catalog field.
    pub cycle_field: key::Binding,
    /// Clear the active filter.
    pub clear_filter: key::Binding,
    /// Apply the edited filter (range mode evaluates here).
    pub apply: key::Binding,
    /// Leave the filter editor.
    pub cancel: key::Binding,
    /// Clear the range bounds while editing them.
    pub clear_range: key::Binding,
    /// Cycle the column sort.
    pub toggle_sort: key::Binding,
    /// Cycle through the preset page sizes.
    pub cycle_page_size: key::Binding,
    /// Refetch the current date window.
    pub refetch: key::Binding,
    /// Quit.
    pub quit: key::Binding,
}

impl Default for TableKeyMap {
    fn default() -> Self {
        Self {
            prev_page: key::Binding::new(vec![KeyCode::Left, KeyCode::Char('h'), KeyCode::PageUp])
                .with_help("←/h", "prev page"),
            next_page: key::Binding::new(vec![
                KeyCode::Right,
                KeyCode::Char('l'),
                KeyCode::PageDown,
            ])
            .with_help("→/l", "next page"),
            first_page: key::Binding::new(vec![KeyCode::Home, KeyCode::Char('g')])
                .with_help("g", "first page"),
            last_page: key::Binding::new(vec![KeyCode::End, KeyCode::Char('G')])
                .with_help("G", "last page"),
            filter: key::Binding::new(vec![KeyCode::Char('/')]).with_help("/", "filter"),
            cycle_field: key::Binding::new(vec![KeyCode::Tab]).with_help("tab", "filter field"),
            clear_filter: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "clear filter"),
            apply: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "apply"),
            cancel: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "cancel"),
            clear_range: key::Binding::new(vec![(KeyCode::Char('u'), KeyModifiers::CONTROL)])
                .with_help("ctrl+u", "clear range"),
            toggle_sort: key::Binding::new(vec![KeyCode::Char('s')]).with_help("s", "sort"),
            cycle_page_size: key::Binding::new(vec![KeyCode::Char('p')])
                .with_help("p", "page size"),
            refetch: key::Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reload"),
            quit: key::Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit"),
        }
    }
}

impl key::KeyMap for TableKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![
            &self.prev_page,
            &self.next_page,
            &self.filter,
            &self.toggle_sort,
            &self.quit,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![
                &self.prev_page,
                &self.next_page,
                &self.first_page,
                &self.last_page,
            ],
            vec![
                &self.filter,
                &self.cycle_field,
                &self.clear_filter,
                &self.apply,
                &self.cancel,
                &self.clear_range,
            ],
            vec![
                &self.toggle_sort,
                &self.cycle_page_size,
                &self.refetch,
                &self.quit,
            ],
        ]
    }
}
