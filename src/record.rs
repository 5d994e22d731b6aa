//! The record abstraction the table engine operates on.
//!
//! Application row types implement [`Record`] and expose their filterable
//! and sortable fields through a single keyed accessor. The engine never
//! sees concrete business types; everything it needs flows through
//! [`FieldValue`].
//!
//! # Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use datatable_widgets::record::{FieldValue, Record};
//!
//! #[derive(Clone)]
//! struct Installment {
//!     code: i64,
//!     customer: String,
//!     due_date: NaiveDate,
//! }
//!
//! impl Record for Installment {
//!     fn field(&self, key: &str) -> Option<FieldValue> {
//!         match key {
//!             "code" => Some(FieldValue::Integer(self.code)),
//!             "customer" => Some(FieldValue::Text(self.customer.clone())),
//!             "due_date" => Some(FieldValue::Date(self.due_date)),
//!             _ => None,
//!         }
//!     }
//! }
//! ```

use chrono::NaiveDate;
use std::cmp::Ordering;

/// Date formats accepted when a date field is carried as text. Both parse
/// from explicit components; partial strings fail instead of coercing.
const TEXT_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// A typed field value as exposed by a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Free text (names, descriptions, document numbers).
    Text(String),
    /// Whole-number values (identifiers, amounts in cents).
    Integer(i64),
    /// A calendar date.
    Date(NaiveDate),
}

impl FieldValue {
    /// The textual form used for substring matching.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Date(d) => d.format("%d/%m/%Y").to_string(),
        }
    }

    /// The calendar date, if this value carries one. Text values are
    /// parsed strictly; anything unparseable is `None` rather than an
    /// error, so malformed rows degrade to non-matching.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            FieldValue::Text(s) => {
                let s = s.trim();
                TEXT_DATE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            }
            FieldValue::Integer(_) => None,
        }
    }
}

/// A totally ordered projection of a field value, used for column sorts.
///
/// `Absent` orders after every present value so rows with a missing or
/// malformed field sink to the bottom regardless of direction of the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortValue {
    /// An integer key.
    Integer(i64),
    /// A date key.
    Date(NaiveDate),
    /// A case-folded text key.
    Text(String),
    /// The field is missing or malformed.
    Absent,
}

impl SortValue {
    fn rank(&self) -> u8 {
        match self {
            SortValue::Integer(_) => 0,
            SortValue::Date(_) => 1,
            SortValue::Text(_) => 2,
            SortValue::Absent => 3,
        }
    }
}

impl From<Option<FieldValue>> for SortValue {
    fn from(value: Option<FieldValue>) -> Self {
        match value {
            Some(FieldValue::Integer(n)) => SortValue::Integer(n),
            Some(FieldValue::Date(d)) => SortValue::Date(d),
            Some(FieldValue::Text(s)) => SortValue::Text(s.to_lowercase()),
            None => SortValue::Absent,
        }
    }
}

impl Ord for SortValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Integer(a), SortValue::Integer(b)) => a.cmp(b),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Trait for rows displayed and filtered by the table engine.
///
/// The single required method is the keyed field accessor; `cell` has a
/// reasonable default for display and can be overridden for formatted
/// output (currency, status labels).
pub trait Record: Clone {
    /// Returns the typed value of the field named by `key`, or `None`
    /// when the record has no such field or the value is unusable.
    fn field(&self, key: &str) -> Option<FieldValue>;

    /// Renders the cell text for a column. Defaults to the field's
    /// textual form, or an empty string when the field is absent.
    fn cell(&self, key: &str) -> String {
        self.field(key).map(|v| v.as_text()).unwrap_or_default()
    }

    /// The sort key for a column. Defaults to the projection of
    /// [`Record::field`]; missing fields become [`SortValue::Absent`].
    fn sort_value(&self, key: &str) -> SortValue {
        SortValue::from(self.field(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Row {
        name: Option<String>,
        total: i64,
    }

    impl Record for Row {
        fn field(&self, key: &str) -> Option<FieldValue> {
            match key {
                "name" => self.name.clone().map(FieldValue::Text),
                "total" => Some(FieldValue::Integer(self.total)),
                _ => None,
            }
        }
    }

    #[test]
    fn test_text_form_of_values() {
        assert_eq!(FieldValue::Integer(1205).as_text(), "1205");
        assert_eq!(FieldValue::Text("Acme".into()).as_text(), "Acme");
        let d = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(FieldValue::Date(d).as_text(), "31/01/2024");
    }

    #[test]
    fn test_text_dates_parse_strictly() {
        assert_eq!(
            FieldValue::Text("2024-01-31".into()).as_date(),
            NaiveDate::from_ymd_opt(2024, 1, 31)
        );
        assert_eq!(
            FieldValue::Text("31/01/2024".into()).as_date(),
            NaiveDate::from_ymd_opt(2024, 1, 31)
        );
        assert_eq!(FieldValue::Text("01/2024".into()).as_date(), None);
        assert_eq!(FieldValue::Text("yesterday".into()).as_date(), None);
        assert_eq!(FieldValue::Integer(20240131).as_date(), None);
    }

    #[test]
    fn test_sort_value_ordering() {
        assert!(SortValue::Integer(1) < SortValue::Integer(2));
        assert!(SortValue::Text("acme".into()) < SortValue::Text("borealis".into()));
        // Absent sinks below any present value.
        assert!(SortValue::Integer(i64::MAX) < SortValue::Absent);
        assert!(SortValue::Text("zzz".into()) < SortValue::Absent);
    }

    #[test]
    fn test_sort_value_folds_case() {
        let row = Row {
            name: Some("Acme".into()),
            total: 0,
        };
        assert_eq!(row.sort_value("name"), SortValue::Text("acme".into()));
    }

    #[test]
    fn test_missing_field_degrades() {
        let row = Row {
            name: None,
            total: 7,
        };
        assert_eq!(row.cell("name"), "");
        assert_eq!(row.sort_value("name"), SortValue::Absent);
        assert_eq!(row.cell("total"), "7");
    }
}
