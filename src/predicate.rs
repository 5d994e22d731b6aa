//! Pure evaluation of a filter criterion against a record set.
//!
//! [`evaluate`] derives the visible subset as a vector of indices into the
//! input slice, preserving input order. It never re-sorts, never mutates,
//! and never fails: incomplete criteria mean "no filter", and records
//! missing the filtered field simply don't match.
//!
//! # Examples
//!
//! ```rust
//! use datatable_widgets::criterion::Model;
//! use datatable_widgets::fields::{Catalog, FieldSpec, MatchKind};
//! use datatable_widgets::predicate::evaluate;
//! use datatable_widgets::record::{FieldValue, Record};
//!
//! #[derive(Clone)]
//! struct Order(&'static str);
//!
//! impl Record for Order {
//!     fn field(&self, key: &str) -> Option<FieldValue> {
//!         (key == "product").then(|| FieldValue::Text(self.0.to_string()))
//!     }
//! }
//!
//! let orders = vec![Order("Notebook"), Order("Monitor"), Order("Keyboard")];
//! let mut criterion = Model::new(Catalog::new(vec![FieldSpec::new(
//!     "product",
//!     "Product",
//!     MatchKind::TextSubstring,
//! )]));
//! criterion.set_scalar_value("board");
//!
//! assert_eq!(evaluate(&orders, criterion.criterion()), vec![2]);
//! ```

use crate::criterion::Criterion;
use crate::fields::MatchKind;
use crate::record::Record;
use tracing::trace;

/// Strips every non-digit character, the normalization applied to both
/// sides of numeric-identifier and document-number comparisons.
fn digits_of(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Reports whether a single record matches a complete criterion.
///
/// Callers normally go through [`evaluate`]; this is exposed for screens
/// that need per-row checks (e.g. highlighting).
pub fn matches<R: Record>(record: &R, criterion: &Criterion) -> bool {
    if !criterion.is_complete() {
        return true;
    }
    match criterion {
        Criterion::Scalar {
            field, normalized, ..
        } => {
            let Some(value) = record.field(field.key) else {
                return false;
            };
            match field.kind {
                MatchKind::NumericSubstring | MatchKind::DocumentNumber => {
                    digits_of(&value.as_text()).contains(&digits_of(normalized))
                }
                MatchKind::TextSubstring => value.as_text().to_lowercase().contains(normalized),
                // A range kind never carries a scalar criterion; treat a
                // mismatched pairing as non-matching rather than guessing.
                MatchKind::DateRange => false,
            }
        }
        Criterion::DateRange {
            field, start, end, ..
        } => {
            let (Some(start), Some(end)) = (start, end) else {
                return true;
            };
            match record.field(field.key).and_then(|v| v.as_date()) {
                Some(d) => *start <= d && d <= *end,
                None => false,
            }
        }
    }
}

/// Evaluates `criterion` over `records`, returning the indices of the
/// matching records in their original order.
///
/// An unset or incomplete criterion returns every index, so the derived
/// view collapses back to the full dataset the instant a filter is
/// cleared.
pub fn evaluate<R: Record>(records: &[R], criterion: &Criterion) -> Vec<usize> {
    if !criterion.is_complete() {
        return (0..records.len()).collect();
    }
    let kept: Vec<usize> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| matches(record, criterion).then_some(index))
        .collect();
    trace!(
        field = criterion.field().key,
        total = records.len(),
        kept = kept.len(),
        "criterion evaluated"
    );
    kept
}
