#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/datatable-widgets/")]

//! # datatable-widgets
//!
//! Filterable, sortable, paginated data-table components for building
//! terminal applications with [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! The crate packages the tabular plumbing that customer-facing portals
//! keep reinventing (orders and invoices screens alike) as reusable
//! components following the Elm Architecture: each component is a model
//! with `update()` and `view()` methods, wired together by messages.
//!
//! The centerpiece is [`datatable::Model`], a controller that owns a full
//! in-memory dataset and derives everything a screen renders from it:
//!
//! - a **filter criterion** over a catalog of typed fields
//!   (digit-normalized identifiers, case-insensitive text, document
//!   numbers, inclusive date ranges),
//! - **debounced** free-text evaluation with generation-tagged
//!   cancellation,
//! - **stable column sorting** over the filtered view,
//! - **page state** with an ellipsis-collapsed page-number control in
//!   full and compact densities,
//! - a **simulated fetch boundary** with loading/error states and a
//!   stale-result guard.
//!
//! ## Components
//!
//! - **Engine**: [`datatable`], [`predicate`], [`criterion`], [`fields`],
//!   [`record`]
//! - **Timing and I/O**: [`debounce`], [`fetch`]
//! - **Controls**: [`pagenav`], [`filterinput`], [`rangepicker`]
//! - **Input**: [`key`]
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use datatable_widgets::prelude::*;
//! use std::sync::Arc;
//!
//! #[derive(Clone)]
//! struct Order {
//!     number: i64,
//!     product: String,
//! }
//!
//! impl Record for Order {
//!     fn field(&self, key: &str) -> Option<FieldValue> {
//!         match key {
//!             "number" => Some(FieldValue::Integer(self.number)),
//!             "product" => Some(FieldValue::Text(self.product.clone())),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let catalog = Catalog::new(vec![
//!     FieldSpec::new("number", "Number", MatchKind::NumericSubstring),
//!     FieldSpec::new("product", "Product", MatchKind::TextSubstring),
//! ]);
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let mut table = DataTable::new(
//!     vec![
//!         Column::new("number", "Number"),
//!         Column::new("product", "Product"),
//!     ],
//!     catalog,
//!     Arc::new(|_window| {
//!         Ok(vec![Order {
//!             number: 1001,
//!             product: "Notebook".into(),
//!         }])
//!     }),
//!     DateWindow::last_month(today),
//! )
//! .with_title("Orders");
//!
//! // In a bubbletea-rs app the init command is returned from init() and
//! // the runtime feeds resulting messages back into update().
//! let _fetch_cmd = table.init();
//! ```

pub mod criterion;
pub mod datatable;
pub mod debounce;
pub mod fetch;
pub mod fields;
pub mod filterinput;
pub mod key;
pub mod pagenav;
pub mod predicate;
pub mod rangepicker;
pub mod record;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// Focused components receive keyboard input and render an input cursor;
/// blurred ones ignore keys entirely. The table controller moves focus
/// between its filter input and range picker as the user switches filter
/// fields.
///
/// # Examples
///
/// ```rust
/// use datatable_widgets::filterinput;
/// use datatable_widgets::Component;
///
/// let mut input = filterinput::new();
/// assert!(!input.focused());
///
/// input.focus();
/// assert!(input.focused());
///
/// input.blur();
/// assert!(!input.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state, optionally returning a
    /// command to run (e.g. starting a cursor blink).
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred state.
    fn blur(&mut self);

    /// Returns the current focus state.
    fn focused(&self) -> bool;
}

pub use criterion::{Criterion, Model as CriterionModel, Transition};
pub use datatable::{
    Column, InputMode, Model as DataTable, SortDirection, SortState, TableKeyMap, TableStyles,
};
pub use debounce::Model as Debounce;
pub use fetch::{DateWindow, FetchError, LoadState, Source};
pub use fields::{Catalog, FieldSpec, MatchKind};
pub use filterinput::Model as FilterInput;
pub use key::{Binding, KeyMap, KeyPress};
pub use pagenav::{sequence as page_sequence, Density, Model as PageNav, PageMarker};
pub use predicate::{evaluate, matches as record_matches};
pub use rangepicker::Model as RangePicker;
pub use record::{FieldValue, Record, SortValue};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use datatable_widgets::prelude::*;
/// ```
pub mod prelude {
    pub use crate::criterion::{Criterion, Model as CriterionModel, Transition};
    pub use crate::datatable::{
        Column, InputMode, Model as DataTable, SortDirection, SortState, TableKeyMap, TableStyles,
    };
    pub use crate::debounce::Model as Debounce;
    pub use crate::fetch::{DateWindow, FetchError, LoadState, Source};
    pub use crate::fields::{Catalog, FieldSpec, MatchKind};
    pub use crate::filterinput::Model as FilterInput;
    pub use crate::key::{Binding, KeyMap, KeyPress};
    pub use crate::pagenav::{sequence as page_sequence, Density, Model as PageNav, PageMarker};
    pub use crate::rangepicker::Model as RangePicker;
    pub use crate::record::{FieldValue, Record, SortValue};
    pub use crate::Component;
}
