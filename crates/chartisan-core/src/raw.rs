//! Shape-tolerant upstream table model.
//!
//! Upstream sources disagree on column naming and shape: labels may be
//! lowercase, capitalized, or mixed, and single-ticker responses sometimes
//! carry a redundant per-ticker grouping level under each field. `RawTable`
//! captures whatever arrived; the normalizer turns it into a [`BarSeries`].
//!
//! [`BarSeries`]: crate::BarSeries

use time::Date;

/// Column label as delivered by the upstream, possibly carrying a
/// redundant secondary grouping level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnLabel {
    Single(String),
    /// Field name plus a secondary grouping level (e.g. the ticker).
    Nested { field: String, group: String },
}

impl ColumnLabel {
    pub fn single(field: impl Into<String>) -> Self {
        Self::Single(field.into())
    }

    pub fn nested(field: impl Into<String>, group: impl Into<String>) -> Self {
        Self::Nested {
            field: field.into(),
            group: group.into(),
        }
    }

    /// The field name with any secondary grouping level collapsed away.
    pub fn field(&self) -> &str {
        match self {
            Self::Single(field) => field,
            Self::Nested { field, .. } => field,
        }
    }
}

/// One raw column: a label and one value per row.
#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    pub label: ColumnLabel,
    pub values: Vec<f64>,
}

impl RawColumn {
    pub fn new(label: ColumnLabel, values: Vec<f64>) -> Self {
        Self { label, values }
    }
}

/// Raw per-day table as fetched from a bar source, prior to normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub dates: Vec<Date>,
    pub columns: Vec<RawColumn>,
}

impl RawTable {
    pub fn new(dates: Vec<Date>, columns: Vec<RawColumn>) -> Self {
        Self { dates, columns }
    }

    pub fn row_count(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
