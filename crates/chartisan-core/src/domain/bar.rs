use serde::{Deserialize, Serialize};
use time::Date;

use crate::Symbol;

/// One trading day's OHLCV record.
///
/// Values arrive from the normalizer as-is: OHLC ordering and non-negative
/// volume are expected from a well-behaved upstream but not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Canonical daily bar series, strictly increasing by date.
///
/// Owned by a single pipeline invocation and immutable once normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub symbol: Symbol,
    pub bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(symbol: Symbol, bars: Vec<Bar>) -> Self {
        Self { symbol, bars }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Last trading date in the series, if any.
    pub fn last_date(&self) -> Option<Date> {
        self.bars.last().map(|bar| bar.date)
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }
}

/// Format a date as `YYYY-MM-DD`, the x-axis value shape the charting
/// runtime expects for daily data.
pub fn iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn formats_iso_date() {
        assert_eq!(iso_date(date!(2024 - 03 - 07)), "2024-03-07");
    }

    #[test]
    fn last_date_of_empty_series_is_none() {
        let series = BarSeries::new(Symbol::parse("AAPL").expect("valid"), Vec::new());
        assert!(series.last_date().is_none());
    }
}
