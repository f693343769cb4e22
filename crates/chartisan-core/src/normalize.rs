//! Canonicalization of raw upstream tables into [`BarSeries`].
//!
//! Matching is case-insensitive against an explicit canonical-name table,
//! and any secondary column grouping level is collapsed before matching.
//! Unmatched columns are discarded, not errored. Value content passes
//! through untouched; this layer only fixes shape and naming.

use std::collections::BTreeMap;

use crate::error::NormalizeError;
use crate::raw::RawTable;
use crate::{Bar, BarSeries, Symbol};

/// The five canonical fields, in output order.
pub const CANONICAL_FIELDS: [&str; 5] = ["open", "high", "low", "close", "volume"];

/// Canonicalize a raw table into a [`BarSeries`].
///
/// # Errors
///
/// - [`NormalizeError::EmptyInput`] when the table has zero rows.
/// - [`NormalizeError::MissingFields`] naming every canonical field that
///   matched no column.
/// - [`NormalizeError::RaggedColumn`] when a matched column's length
///   disagrees with the date index.
pub fn normalize(symbol: &Symbol, table: &RawTable) -> Result<BarSeries, NormalizeError> {
    if table.is_empty() {
        return Err(NormalizeError::EmptyInput);
    }

    let rows = table.row_count();
    let mut matched: [Option<&[f64]>; 5] = [None; 5];
    let mut missing = Vec::new();

    for (slot, canonical) in CANONICAL_FIELDS.iter().enumerate() {
        let column = table
            .columns
            .iter()
            .find(|column| column.label.field().eq_ignore_ascii_case(canonical));

        match column {
            Some(column) => {
                if column.values.len() != rows {
                    return Err(NormalizeError::RaggedColumn {
                        field: (*canonical).to_owned(),
                        expected: rows,
                        actual: column.values.len(),
                    });
                }
                matched[slot] = Some(column.values.as_slice());
            }
            None => missing.push((*canonical).to_owned()),
        }
    }

    if !missing.is_empty() {
        return Err(NormalizeError::MissingFields { fields: missing });
    }

    // All five are present past this point.
    let open = matched[0].expect("open matched");
    let high = matched[1].expect("high matched");
    let low = matched[2].expect("low matched");
    let close = matched[3].expect("close matched");
    let volume = matched[4].expect("volume matched");

    // Establish the series invariant: strictly increasing dates, no
    // duplicates. Later rows win on a duplicate date.
    let mut by_date = BTreeMap::new();
    for (index, date) in table.dates.iter().enumerate() {
        by_date.insert(
            *date,
            Bar {
                date: *date,
                open: open[index],
                high: high[index],
                low: low[index],
                close: close[index],
                volume: volume[index],
            },
        );
    }

    Ok(BarSeries::new(
        symbol.clone(),
        by_date.into_values().collect(),
    ))
}
