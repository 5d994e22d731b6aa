//! The table controller model: construction, state, and the render
//! contract exposed to screens.

use super::keys::TableKeyMap;
use super::style::TableStyles;
use super::types::{Column, InputMode, SortState, PAGE_SIZES};
use crate::criterion;
use crate::debounce;
use crate::fetch::{self, DateWindow, LoadState, Source};
use crate::fields::Catalog;
use crate::filterinput;
use crate::pagenav::{self, Density, PageMarker};
use crate::rangepicker;
use crate::record::Record;
use bubbletea_rs::Cmd;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A filterable, sortable, paginated table over an in-memory dataset.
///
/// The model owns the full dataset for the lifetime of a screen session
/// and derives everything else: the visible subset is a memoized index
/// vector recomputed from `(records, criterion, sort)` whenever one of
/// its inputs changes, and the page slice and page-marker sequence are
/// projections of that subset. Nothing derived is ever mutated on its
/// own.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use datatable_widgets::datatable::{Column, Model};
/// use datatable_widgets::fetch::DateWindow;
/// use datatable_widgets::fields::{Catalog, FieldSpec, MatchKind};
/// use datatable_widgets::record::{FieldValue, Record};
/// use std::sync::Arc;
///
/// #[derive(Clone)]
/// struct Order {
///     code: i64,
///     product: String,
/// }
///
/// impl Record for Order {
///     fn field(&self, key: &str) -> Option<FieldValue> {
///         match key {
///             "code" => Some(FieldValue::Integer(self.code)),
///             "product" => Some(FieldValue::Text(self.product.clone())),
///             _ => None,
///         }
///     }
/// }
///
/// let catalog = Catalog::new(vec![
///     FieldSpec::new("code", "Code", MatchKind::NumericSubstring),
///     FieldSpec::new("product", "Product", MatchKind::TextSubstring),
/// ]);
/// let window = DateWindow::last_month(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
///
/// let table = Model::new(
///     vec![Column::new("code", "Code"), Column::new("product", "Product")],
///     catalog,
///     Arc::new(|_| Ok(Vec::new())),
///     window,
/// )
/// .with_title("Orders")
/// .with_page_size(25)
/// .with_records(vec![Order { code: 1, product: "Notebook".into() }]);
///
/// assert_eq!(table.total_filtered_count(), 1);
/// assert_eq!(table.page_count(), 1);
/// ```
pub struct Model<R: Record> {
    pub(super) title: String,
    pub(super) columns: Vec<Column>,

    // Owned dataset and its derived view (indices into `records`).
    pub(super) records: Vec<R>,
    pub(super) visible: Vec<usize>,

    // Filtering
    pub(super) criterion: criterion::Model,
    pub(super) filter_input: filterinput::Model,
    pub(super) range_picker: rangepicker::Model,
    pub(super) debounce: debounce::Model,

    // Sorting and pagination
    pub(super) sort: Option<SortState>,
    pub(super) pages: pagenav::Model,

    // Fetch boundary
    pub(super) load: LoadState,
    pub(super) request: i64,
    pub(super) source: Source<R>,
    pub(super) window: DateWindow,
    pub(super) fetch_delay: Duration,

    // Input routing and presentation
    pub(super) mode: InputMode,
    pub(super) keymap: TableKeyMap,
    pub(super) styles: TableStyles,
}

impl<R: Record + Send + Sync + 'static> Model<R> {
    /// Creates a table over the given columns, filter catalog, data
    /// source, and initial date window. The dataset starts empty; call
    /// [`Model::init`] to issue the first fetch, or seed rows directly
    /// with [`Model::with_records`].
    pub fn new(
        columns: Vec<Column>,
        catalog: Catalog,
        source: Source<R>,
        window: DateWindow,
    ) -> Self {
        Self {
            title: "Records".to_string(),
            columns,
            records: Vec::new(),
            visible: Vec::new(),
            criterion: criterion::Model::new(catalog),
            filter_input: filterinput::new().with_placeholder("type to filter"),
            range_picker: rangepicker::new(),
            debounce: debounce::Model::new(),
            sort: None,
            pages: pagenav::Model::new(),
            load: LoadState::Ready,
            request: 0,
            source,
            window,
            fetch_delay: fetch::DEFAULT_DELAY,
            mode: InputMode::Browsing,
            keymap: TableKeyMap::default(),
            styles: TableStyles::default(),
        }
    }

    /// Sets the table title (builder pattern).
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Sets the initial page size (builder pattern).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.pages.set_per_page(page_size);
        self
    }

    /// Sets the page-control density (builder pattern).
    pub fn with_density(mut self, density: Density) -> Self {
        self.pages.density = density;
        self
    }

    /// Sets the debounce quiet period (builder pattern).
    pub fn with_debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce = debounce::Model::with_delay(delay);
        self
    }

    /// Sets the artificial fetch latency (builder pattern).
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    /// Seeds the dataset directly, bypassing the fetch boundary (builder
    /// pattern). Useful for tests and screens that already hold data.
    pub fn with_records(mut self, records: Vec<R>) -> Self {
        self.replace_records(records);
        self
    }

    /// Issues the initial fetch for the configured window.
    pub fn init(&mut self) -> Cmd {
        self.refetch(self.window)
    }

    /// Issues a fetch for a new coarse date window. The active filter
    /// criterion deliberately survives; it is re-evaluated against the
    /// new dataset on completion.
    pub fn refetch(&mut self, window: DateWindow) -> Cmd {
        self.window = window;
        self.request = fetch::next_request_id();
        self.load = LoadState::Loading;
        fetch::command(
            self.request,
            self.fetch_delay,
            window,
            Arc::clone(&self.source),
        )
    }

    /// Swaps in a freshly fetched dataset and re-derives the view. The
    /// page index is clamped into the new range rather than reset.
    pub(super) fn replace_records(&mut self, records: Vec<R>) {
        self.records = records;
        self.load = LoadState::Ready;
        self.refresh_visible(false);
    }

    // --- Render contract -------------------------------------------------

    /// The rows of the current page, in display order.
    pub fn visible_rows(&self) -> Vec<&R> {
        let (start, end) = self.pages.slice_bounds(self.visible.len());
        self.visible[start..end]
            .iter()
            .map(|&i| &self.records[i])
            .collect()
    }

    /// Total number of rows that match the active criterion.
    pub fn total_filtered_count(&self) -> usize {
        self.visible.len()
    }

    /// Total number of rows in the full dataset.
    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    /// Number of pages over the filtered rows (at least 1).
    pub fn page_count(&self) -> usize {
        self.pages.total_pages
    }

    /// The current page, 1-based.
    pub fn current_page(&self) -> usize {
        self.pages.current_page()
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.pages.per_page
    }

    /// Whether a refetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.load.is_loading()
    }

    /// The load state, including a possible fetch error.
    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// The marker sequence for the pagination control.
    pub fn page_sequence(&self) -> Vec<PageMarker> {
        self.pages.sequence()
    }

    /// The active criterion model (field, value, completeness).
    pub fn criterion(&self) -> &criterion::Model {
        &self.criterion
    }

    /// The active column sort, if any.
    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    /// Where keyboard input is currently routed.
    pub fn input_mode(&self) -> InputMode {
        self.mode
    }

    // --- Pagination operations -------------------------------------------

    /// Moves to a 1-based page, clamping into range. Ignored while a
    /// fetch is in flight.
    pub fn set_page(&mut self, page: usize) {
        if self.guard_loading("set_page") {
            return;
        }
        self.pages.set_page(page.saturating_sub(1));
    }

    /// Changes the page size, re-deriving the page count and clamping
    /// the page index into range; the page only moves when it would land
    /// past the end. Ignored while a fetch is in flight.
    pub fn set_page_size(&mut self, page_size: usize) {
        if self.guard_loading("set_page_size") {
            return;
        }
        self.pages.set_per_page(page_size);
        self.pages.set_total_items(self.visible.len());
    }

    /// Cycles through the preset page sizes.
    pub(super) fn cycle_page_size(&mut self) {
        let current = self.pages.per_page;
        let next = PAGE_SIZES
            .iter()
            .position(|&s| s == current)
            .map(|i| PAGE_SIZES[(i + 1) % PAGE_SIZES.len()])
            .unwrap_or(PAGE_SIZES[0]);
        self.set_page_size(next);
    }

    /// Logs and reports whether an operation must be dropped because the
    /// dataset is being replaced.
    pub(super) fn guard_loading(&self, op: &str) -> bool {
        if self.load.is_loading() {
            debug!(op, "ignored while dataset fetch is in flight");
            return true;
        }
        false
    }
}
