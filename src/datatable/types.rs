//! Core types for the data-table controller.

/// A displayed column: the record field it projects and how it renders.
#[derive(Debug, Clone)]
pub struct Column {
    /// Field key looked up on each record.
    pub key: &'static str,
    /// Header text.
    pub title: String,
    /// Cell width; defaults to the title width when unset.
    pub width: Option<usize>,
}

impl Column {
    /// Creates a column projecting `key` with the given header.
    pub fn new(key: &'static str, title: impl Into<String>) -> Self {
        Self {
            key,
            title: title.into(),
            width: None,
        }
    }

    /// Sets a fixed cell width (builder pattern).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }
}

/// Direction of a column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The active column sort, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    /// Key of the sorted column.
    pub column: &'static str,
    /// Sort direction.
    pub direction: SortDirection,
}

/// Where keyboard input is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys navigate pages, sorting, and fetching.
    Browsing,
    /// Keys edit the scalar filter query.
    EditingQuery,
    /// Keys edit the date-range bounds.
    EditingRange,
}

/// Page sizes cycled by the page-size key.
pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];
