//! Page navigation state and the ellipsis-collapsed page-number sequence.
//!
//! This component tracks the current page, page size, and page count, and
//! renders the classic first/last-anchored pagination control: a window of
//! page numbers around the current page with ellipsis placeholders where
//! runs of pages collapse. Two density modes cover wide and narrow
//! viewports.
//!
//! Like its content, the control itself is purely derived state: the
//! marker sequence is recomputed from `(current page, page count,
//! density)` on every render and never stored.
//!
//! # Examples
//!
//! ```rust
//! use datatable_widgets::pagenav::{sequence, Density, PageMarker};
//!
//! let markers = sequence(10, 20, Density::Full);
//! assert_eq!(
//!     markers,
//!     vec![
//!         PageMarker::Number(1),
//!         PageMarker::Ellipsis,
//!         PageMarker::Number(9),
//!         PageMarker::Number(10),
//!         PageMarker::Number(11),
//!         PageMarker::Ellipsis,
//!         PageMarker::Number(20),
//!     ]
//! );
//! ```
//!
//! ## Managing page state
//!
//! ```rust
//! use datatable_widgets::pagenav::Model;
//!
//! let mut pages = Model::new().with_per_page(6).with_total_items(13);
//! assert_eq!(pages.total_pages, 3);
//!
//! // Out-of-range requests clamp instead of erroring.
//! pages.set_page(4);
//! assert_eq!(pages.current_page(), 3);
//! ```

use crate::key::{self, KeyMap as KeyMapTrait};
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;

/// How aggressively the page sequence collapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Density {
    /// Desktop-width control: up to seven pages before collapsing, one
    /// neighbor either side of the current page.
    #[default]
    Full,
    /// Narrow control: up to three pages before collapsing, the current
    /// page shown alone between the anchors.
    Compact,
}

impl Density {
    /// The largest page count rendered without any ellipsis.
    pub fn threshold(&self) -> usize {
        match self {
            Density::Full => 7,
            Density::Compact => 3,
        }
    }
}

/// One element of the rendered page control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    /// A concrete, navigable page number (1-based).
    Number(usize),
    /// A collapsed run of pages.
    Ellipsis,
}

/// Computes the ordered marker sequence for a pagination control.
///
/// Pages are 1-based here; `current_page` is clamped into
/// `[1, page_count]` before the sequence is derived, so out-of-range
/// inputs produce a valid control rather than a panic. A `page_count` of
/// zero or one yields an empty sequence, and such a control renders
/// nothing.
pub fn sequence(current_page: usize, page_count: usize, density: Density) -> Vec<PageMarker> {
    use PageMarker::{Ellipsis, Number};

    if page_count <= 1 {
        return Vec::new();
    }
    let current = current_page.clamp(1, page_count);

    if page_count <= density.threshold() {
        return (1..=page_count).map(Number).collect();
    }

    match density {
        Density::Full => {
            if current <= 3 {
                vec![
                    Number(1),
                    Number(2),
                    Number(3),
                    Number(4),
                    Ellipsis,
                    Number(page_count),
                ]
            } else if current >= page_count - 2 {
                vec![
                    Number(1),
                    Ellipsis,
                    Number(page_count - 3),
                    Number(page_count - 2),
                    Number(page_count - 1),
                    Number(page_count),
                ]
            } else {
                vec![
                    Number(1),
                    Ellipsis,
                    Number(current - 1),
                    Number(current),
                    Number(current + 1),
                    Ellipsis,
                    Number(page_count),
                ]
            }
        }
        Density::Compact => {
            if current <= 2 {
                vec![Number(1), Number(2), Ellipsis, Number(page_count)]
            } else if current >= page_count - 1 {
                vec![
                    Number(1),
                    Ellipsis,
                    Number(page_count - 1),
                    Number(page_count),
                ]
            } else {
                vec![
                    Number(1),
                    Ellipsis,
                    Number(current),
                    Ellipsis,
                    Number(page_count),
                ]
            }
        }
    }
}

/// Key bindings for page navigation.
#[derive(Debug, Clone)]
pub struct PageKeyMap {
    /// Go to the previous page.
    pub prev_page: key::Binding,
    /// Go to the next page.
    pub next_page: key::Binding,
    /// Jump to the first page.
    pub first_page: key::Binding,
    /// Jump to the last page.
    pub last_page: key::Binding,
}

impl Default for PageKeyMap {
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
                .with_help("g/home", "first page"),
            last_page: key::Binding::new(vec![KeyCode::End, KeyCode::Char('G')])
                .with_help("G/end", "last page"),
        }
    }
}

impl KeyMapTrait for PageKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.prev_page, &self.next_page]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![
            &self.prev_page,
            &self.next_page,
            &self.first_page,
            &self.last_page,
        ]]
    }
}

/// Page navigation model: current page, page size, page count, density.
///
/// The page index is 0-based internally (matching slice math); the
/// rendered control and [`Model::current_page`] are 1-based.
#[derive(Debug, Clone)]
pub struct Model {
    /// The current page, 0-based.
    pub page: usize,
    /// Rows per page, minimum 1.
    pub per_page: usize,
    /// Total number of pages, minimum 1.
    pub total_pages: usize,
    /// Collapsing density of the rendered control.
    pub density: Density,

    /// Style for the current page's number.
    pub active_style: Style,
    /// Style for every other page number.
    pub inactive_style: Style,
    /// Style for ellipsis placeholders.
    pub ellipsis_style: Style,

    /// Key bindings.
    pub keymap: PageKeyMap,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: 10,
            total_pages: 1,
            density: Density::default(),
            active_style: Style::new().bold(true).reverse(true),
            inactive_style: Style::new().foreground(AdaptiveColor {
                Light: "#847A85",
                Dark: "#979797",
            }),
            ellipsis_style: Style::new().faint(true),
            keymap: PageKeyMap::default(),
        }
    }
}

impl Model {
    /// Creates a page model with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets rows per page (builder pattern). Values below 1 clamp to 1.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.set_per_page(per_page);
        self
    }

    /// Sets the total item count and derives the page count (builder
    /// pattern).
    pub fn with_total_items(mut self, items: usize) -> Self {
        self.set_total_items(items);
        self
    }

    /// Sets the collapsing density (builder pattern).
    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    /// Sets rows per page. Values below 1 clamp to 1.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
    }

    /// Derives the page count from a total item count and clamps the
    /// current page into the new range. Zero items still mean one
    /// (empty) page.
    pub fn set_total_items(&mut self, items: usize) {
        self.total_pages = if items == 0 {
            1
        } else {
            items.div_ceil(self.per_page)
        };
        if self.page >= self.total_pages {
            self.page = self.total_pages - 1;
        }
    }

    /// Moves to a 0-based page, clamping into range.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.total_pages.saturating_sub(1));
    }

    /// The current page, 1-based, as shown to the user.
    pub fn current_page(&self) -> usize {
        self.page + 1
    }

    /// Whether the current page is the first.
    pub fn on_first_page(&self) -> bool {
        self.page == 0
    }

    /// Whether the current page is the last.
    pub fn on_last_page(&self) -> bool {
        self.page == self.total_pages.saturating_sub(1)
    }

    /// Moves one page back; a no-op on the first page.
    pub fn prev_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
        }
    }

    /// Moves one page forward; a no-op on the last page.
    pub fn next_page(&mut self) {
        if !self.on_last_page() {
            self.page += 1;
        }
    }

    /// Jumps to the first page.
    pub fn first_page(&mut self) {
        self.page = 0;
    }

    /// Jumps to the last page.
    pub fn last_page(&mut self) {
        self.page = self.total_pages.saturating_sub(1);
    }

    /// Slice bounds of the current page over `length` items, suitable for
    /// direct use with slice notation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datatable_widgets::pagenav::Model;
    ///
    /// let rows: Vec<u32> = (0..25).collect();
    /// let mut pages = Model::new().with_per_page(10).with_total_items(rows.len());
    /// pages.set_page(2);
    ///
    /// let (start, end) = pages.slice_bounds(rows.len());
    /// assert_eq!(&rows[start..end], &[20, 21, 22, 23, 24]);
    /// ```
    pub fn slice_bounds(&self, length: usize) -> (usize, usize) {
        let start = (self.page * self.per_page).min(length);
        let end = (start + self.per_page).min(length);
        (start, end)
    }

    /// Number of items on the current page.
    pub fn items_on_page(&self, total_items: usize) -> usize {
        let (start, end) = self.slice_bounds(total_items);
        end - start
    }

    /// The marker sequence for the current state.
    pub fn sequence(&self) -> Vec<PageMarker> {
        sequence(self.current_page(), self.total_pages, self.density)
    }

    /// Handles navigation key presses.
    pub fn update(&mut self, msg: &Msg) {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.next_page.matches(key_msg) {
                self.next_page();
            } else if self.keymap.prev_page.matches(key_msg) {
                self.prev_page();
            } else if self.keymap.first_page.matches(key_msg) {
                self.first_page();
            } else if self.keymap.last_page.matches(key_msg) {
                self.last_page();
            }
        }
    }

    /// Renders the page control, or an empty string when there is a
    /// single page (nothing to navigate).
    pub fn view(&self) -> String {
        if self.total_pages <= 1 {
            return String::new();
        }
        let rendered: Vec<String> = self
            .sequence()
            .into_iter()
            .map(|marker| match marker {
                PageMarker::Number(n) if n == self.current_page() => {
                    self.active_style.clone().render(&n.to_string())
                }
                PageMarker::Number(n) => self.inactive_style.clone().render(&n.to_string()),
                PageMarker::Ellipsis => self.ellipsis_style.clone().render("…"),
            })
            .collect();
        rendered.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageMarker::{Ellipsis, Number};

    fn numbers(markers: &[PageMarker]) -> Vec<usize> {
        markers
            .iter()
            .filter_map(|m| match m {
                Number(n) => Some(*n),
                Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn test_small_counts_render_plainly() {
        assert_eq!(
            sequence(2, 7, Density::Full),
            (1..=7).map(Number).collect::<Vec<_>>()
        );
        assert_eq!(
            sequence(1, 3, Density::Compact),
            vec![Number(1), Number(2), Number(3)]
        );
    }

    #[test]
    fn test_single_page_renders_nothing() {
        assert!(sequence(1, 1, Density::Full).is_empty());
        assert!(sequence(1, 0, Density::Full).is_empty());
        let pages = Model::new().with_total_items(5);
        assert_eq!(pages.view(), "");
    }

    #[test]
    fn test_full_density_head_anchored() {
        assert_eq!(
            sequence(2, 12, Density::Full),
            vec![
                Number(1),
                Number(2),
                Number(3),
                Number(4),
                Ellipsis,
                Number(12)
            ]
        );
    }

    #[test]
    fn test_full_density_tail_anchored() {
        assert_eq!(
            sequence(11, 12, Density::Full),
            vec![
                Number(1),
                Ellipsis,
                Number(9),
                Number(10),
                Number(11),
                Number(12)
            ]
        );
    }

    #[test]
    fn test_full_density_middle_window() {
        assert_eq!(
            sequence(10, 20, Density::Full),
            vec![
                Number(1),
                Ellipsis,
                Number(9),
                Number(10),
                Number(11),
                Ellipsis,
                Number(20)
            ]
        );
    }

    #[test]
    fn test_compact_density_collapses_harder() {
        assert_eq!(
            sequence(1, 9, Density::Compact),
            vec![Number(1), Number(2), Ellipsis, Number(9)]
        );
        assert_eq!(
            sequence(5, 9, Density::Compact),
            vec![Number(1), Ellipsis, Number(5), Ellipsis, Number(9)]
        );
        assert_eq!(
            sequence(9, 9, Density::Compact),
            vec![Number(1), Ellipsis, Number(8), Number(9)]
        );
    }

    #[test]
    fn test_sequence_invariants_hold_everywhere() {
        for density in [Density::Full, Density::Compact] {
            for page_count in 2..=40 {
                for current in 1..=page_count {
                    let seq = sequence(current, page_count, density);
                    let nums = numbers(&seq);

                    assert!(
                        nums.iter().all(|&n| (1..=page_count).contains(&n)),
                        "marker out of range for {current}/{page_count}"
                    );
                    assert!(nums.contains(&1));
                    assert!(nums.contains(&page_count));
                    assert!(nums.contains(&current));
                    for pair in seq.windows(2) {
                        assert!(
                            !(pair[0] == Ellipsis && pair[1] == Ellipsis),
                            "adjacent ellipses for {current}/{page_count}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_current_is_clamped() {
        assert_eq!(
            sequence(99, 5, Density::Full),
            (1..=5).map(Number).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_total_items_derivation_and_clamp() {
        let mut pages = Model::new().with_per_page(6).with_total_items(13);
        assert_eq!(pages.total_pages, 3);

        pages.set_page(4);
        assert_eq!(pages.page, 2);

        // Shrinking the dataset pulls the page back into range.
        pages.set_total_items(5);
        assert_eq!(pages.total_pages, 1);
        assert_eq!(pages.page, 0);

        pages.set_total_items(0);
        assert_eq!(pages.total_pages, 1);
    }

    #[test]
    fn test_navigation_clamps_at_bounds() {
        let mut pages = Model::new().with_per_page(10).with_total_items(30);
        pages.prev_page();
        assert_eq!(pages.page, 0);

        pages.last_page();
        assert_eq!(pages.page, 2);
        pages.next_page();
        assert_eq!(pages.page, 2);

        pages.first_page();
        assert!(pages.on_first_page());
    }

    #[test]
    fn test_slice_bounds_on_partial_last_page() {
        let mut pages = Model::new().with_per_page(6).with_total_items(13);
        pages.last_page();
        assert_eq!(pages.slice_bounds(13), (12, 13));
        assert_eq!(pages.items_on_page(13), 1);
    }

    #[test]
    fn test_key_navigation() {
        use crossterm::event::KeyModifiers;

        let mut pages = Model::new().with_per_page(10).with_total_items(50);
        let right = Box::new(KeyMsg {
            key: KeyCode::Right,
            modifiers: KeyModifiers::NONE,
        }) as Msg;
        pages.update(&right);
        assert_eq!(pages.page, 1);

        let end = Box::new(KeyMsg {
            key: KeyCode::End,
            modifiers: KeyModifiers::NONE,
        }) as Msg;
        pages.update(&end);
        assert_eq!(pages.page, 4);
    }

    #[test]
    fn test_view_marks_active_page() {
        let mut pages = Model::new().with_per_page(10).with_total_items(50);
        pages.set_page(2);
        let view = pages.view();
        assert!(view.contains('3'));
        assert!(!view.is_empty());
    }
}
