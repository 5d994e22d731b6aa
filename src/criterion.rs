//! The active filter criterion and its state machine.
//!
//! A criterion is either a scalar query against one field or a pair of
//! inclusive date bounds against the catalog's range field, never both.
//! Switching fields always discards the previous value, so the visible
//! dataset reverts to the full dataset until a new value arrives.
//!
//! Field switches report a [`Transition`] carrying two separate signals:
//! the data-level "revert to full dataset" and the UI-level "open the
//! range picker". The engine consumes the first; presentation code is free
//! to ignore or act on the second.
//!
//! # Examples
//!
//! ```rust
//! use datatable_widgets::criterion::Model;
//! use datatable_widgets::fields::{Catalog, FieldSpec, MatchKind};
//!
//! let mut criterion = Model::new(Catalog::new(vec![
//!     FieldSpec::new("customer", "Customer", MatchKind::TextSubstring),
//!     FieldSpec::new("due_date", "Due date", MatchKind::DateRange),
//! ]));
//!
//! criterion.set_scalar_value("  Acme ");
//! assert!(criterion.is_complete());
//!
//! let transition = criterion.set_field("due_date");
//! assert!(transition.reverted);
//! assert!(transition.open_range_picker);
//! assert!(!criterion.is_complete());
//! ```

use crate::fields::{Catalog, FieldSpec};
use chrono::NaiveDate;
use tracing::debug;

/// The active filter definition: one field plus either a scalar query or
/// a pair of optional date bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// A scalar query against a non-range field.
    Scalar {
        /// The field being filtered.
        field: FieldSpec,
        /// The text as typed, preserved for display.
        raw: String,
        /// Trimmed, lower-cased form used for comparison.
        normalized: String,
    },
    /// A date window against the range field. Both bounds are required
    /// before the criterion is complete; the end bound covers its entire
    /// calendar day, so a single-day range is inclusive.
    DateRange {
        /// The field being filtered.
        field: FieldSpec,
        /// Inclusive lower bound.
        start: Option<NaiveDate>,
        /// Inclusive upper bound.
        end: Option<NaiveDate>,
    },
}

impl Criterion {
    /// An empty criterion of the right shape for `field`.
    pub fn empty_for(field: &FieldSpec) -> Self {
        if field.kind.is_range() {
            Criterion::DateRange {
                field: field.clone(),
                start: None,
                end: None,
            }
        } else {
            Criterion::Scalar {
                field: field.clone(),
                raw: String::new(),
                normalized: String::new(),
            }
        }
    }

    /// The field this criterion applies to.
    pub fn field(&self) -> &FieldSpec {
        match self {
            Criterion::Scalar { field, .. } => field,
            Criterion::DateRange { field, .. } => field,
        }
    }

    /// Whether the criterion carries enough to actually filter.
    ///
    /// A scalar criterion is complete once its normalized value is
    /// non-empty; a range criterion needs both bounds. An incomplete
    /// criterion is indistinguishable from "no filter" during evaluation.
    pub fn is_complete(&self) -> bool {
        match self {
            Criterion::Scalar { normalized, .. } => !normalized.is_empty(),
            Criterion::DateRange { start, end, .. } => start.is_some() && end.is_some(),
        }
    }
}

/// The two signals emitted by a field switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The visible dataset must revert to the full dataset (the previous
    /// value was discarded).
    pub reverted: bool,
    /// The new field filters by date range; presentation code should open
    /// its range picker.
    pub open_range_picker: bool,
}

/// Holds the field catalog and the currently active criterion.
#[derive(Debug, Clone)]
pub struct Model {
    catalog: Catalog,
    criterion: Criterion,
}

impl Model {
    /// Creates a criterion model over `catalog`, starting empty on the
    /// default field.
    pub fn new(catalog: Catalog) -> Self {
        let criterion = Criterion::empty_for(catalog.default_field());
        Self { catalog, criterion }
    }

    /// The field catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The active criterion.
    pub fn criterion(&self) -> &Criterion {
        &self.criterion
    }

    /// The active field.
    pub fn field(&self) -> &FieldSpec {
        self.criterion.field()
    }

    /// Whether the active criterion is complete enough to filter.
    pub fn is_complete(&self) -> bool {
        self.criterion.is_complete()
    }

    /// The scalar value as typed, or empty for range criteria.
    pub fn raw_value(&self) -> &str {
        match &self.criterion {
            Criterion::Scalar { raw, .. } => raw,
            Criterion::DateRange { .. } => "",
        }
    }

    /// Switches the active field, discarding any previous value or
    /// partial range.
    ///
    /// Unknown keys fall back to the default field rather than erroring.
    /// The returned [`Transition`] always reverts (the value was cleared)
    /// and asks for the range picker when the new field is the range
    /// field.
    pub fn set_field(&mut self, key: &str) -> Transition {
        let field = match self.catalog.get(key) {
            Some(f) => f.clone(),
            None => {
                debug!(key, "unknown filter field, falling back to default");
                self.catalog.default_field().clone()
            }
        };
        let open_range_picker = field.kind.is_range();
        self.criterion = Criterion::empty_for(&field);
        Transition {
            reverted: true,
            open_range_picker,
        }
    }

    /// Switches to the next field in catalog order (for key-driven UIs).
    pub fn cycle_field(&mut self) -> Transition {
        let next = self.catalog.next_after(self.criterion.field().key).key;
        self.set_field(next)
    }

    /// Stores a scalar query value against the active field.
    ///
    /// The raw text is kept for display; comparison uses the trimmed,
    /// lower-cased normalization. Returns `false` (and changes nothing)
    /// when the active field filters by date range.
    pub fn set_scalar_value(&mut self, text: &str) -> bool {
        match &mut self.criterion {
            Criterion::Scalar {
                raw, normalized, ..
            } => {
                *raw = text.to_string();
                *normalized = text.trim().to_lowercase();
                true
            }
            Criterion::DateRange { field, .. } => {
                debug!(field = field.key, "scalar value ignored for range field");
                false
            }
        }
    }

    /// Stores date bounds against the active field.
    ///
    /// One-sided bounds are accepted and leave the criterion incomplete
    /// (treated as "no filter" by evaluation). Returns `false` (and
    /// changes nothing) when the active field is not the range field.
    pub fn set_date_range(&mut self, new_start: Option<NaiveDate>, new_end: Option<NaiveDate>) -> bool {
        match &mut self.criterion {
            Criterion::DateRange { start, end, .. } => {
                *start = new_start;
                *end = new_end;
                true
            }
            Criterion::Scalar { field, .. } => {
                debug!(field = field.key, "date range ignored for scalar field");
                false
            }
        }
    }

    /// Clears the value of the active criterion, keeping the field.
    pub fn clear_value(&mut self) {
        self.criterion = Criterion::empty_for(self.criterion.field());
    }

    /// Resets to the initial state: default field, no value. The model is
    /// indistinguishable from a freshly constructed one afterwards.
    pub fn clear(&mut self) {
        self.criterion = Criterion::empty_for(self.catalog.default_field());
    }
}
