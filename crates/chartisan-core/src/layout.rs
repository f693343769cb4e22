//! Default viewport window and log-scale y-axis bounds.

use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::error::LayoutError;
use crate::BarSeries;

/// Initial visible window when no viewport length is configured.
pub const DEFAULT_VIEWPORT_DAYS: u32 = 180;

/// Headroom applied above the viewport high before log conversion.
const UPPER_MARGIN: f64 = 1.1;
/// Headroom applied below the viewport low before log conversion.
const LOWER_MARGIN: f64 = 0.9;

/// Closed date interval initially visible in the rendered chart.
///
/// `end` is the series' last date; `start` is `end` minus the configured
/// number of calendar days, so weekends and holidays inside the interval
/// reduce the bar count but never shift the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub start: Date,
    pub end: Date,
}

impl Viewport {
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Price-axis bounds in log10 space; the price pane always renders on a
/// logarithmic scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub log_min: f64,
    pub log_max: f64,
}

/// Derive the viewport and y-axis bounds from the full series.
///
/// # Errors
///
/// - [`LayoutError::InsufficientHistory`] when no bar's date falls inside
///   the trailing window.
/// - [`LayoutError::NonPositiveRange`] when the margined extent cannot be
///   expressed in log10 space.
pub fn compute_layout(series: &BarSeries, days: u32) -> Result<(Viewport, AxisBounds), LayoutError> {
    let end = series
        .last_date()
        .ok_or(LayoutError::InsufficientHistory { days })?;
    let start = end
        .checked_sub(Duration::days(i64::from(days)))
        .unwrap_or(Date::MIN);
    let viewport = Viewport { start, end };

    let mut y_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut visible = 0_usize;

    for bar in series.bars.iter().filter(|bar| viewport.contains(bar.date)) {
        y_max = y_max.max(bar.high);
        y_min = y_min.min(bar.low);
        visible += 1;
    }

    if visible == 0 {
        return Err(LayoutError::InsufficientHistory { days });
    }

    let y_max = y_max * UPPER_MARGIN;
    let y_min = y_min * LOWER_MARGIN;
    if y_min <= 0.0 || y_max <= 0.0 || !y_min.is_finite() || !y_max.is_finite() {
        return Err(LayoutError::NonPositiveRange { y_min, y_max });
    }

    Ok((
        viewport,
        AxisBounds {
            log_min: y_min.log10(),
            log_max: y_max.log10(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{Bar, Symbol};

    use super::*;

    fn bar(date: Date, low: f64, high: f64) -> Bar {
        Bar {
            date,
            open: low,
            high,
            low,
            close: high,
            volume: 100.0,
        }
    }

    fn series(bars: Vec<Bar>) -> BarSeries {
        BarSeries::new(Symbol::parse("TEST").expect("valid"), bars)
    }

    #[test]
    fn viewport_span_is_exact_calendar_days() {
        let s = series(vec![
            bar(date!(2023 - 11 - 01), 90.0, 110.0),
            bar(date!(2024 - 03 - 01), 95.0, 120.0),
        ]);

        let (viewport, _) = compute_layout(&s, 180).expect("must compute");
        assert_eq!(viewport.end, date!(2024 - 03 - 01));
        assert_eq!(viewport.end - viewport.start, Duration::days(180));
    }

    #[test]
    fn bounds_use_only_bars_inside_the_viewport() {
        // The old spike at 500 is outside the 30-day window and must not
        // affect the bounds.
        let s = series(vec![
            bar(date!(2023 - 01 - 02), 400.0, 500.0),
            bar(date!(2024 - 02 - 20), 90.0, 110.0),
            bar(date!(2024 - 03 - 01), 95.0, 120.0),
        ]);

        let (_, bounds) = compute_layout(&s, 30).expect("must compute");
        assert!((bounds.log_max - (120.0_f64 * 1.1).log10()).abs() < 1e-12);
        assert!((bounds.log_min - (90.0_f64 * 0.9).log10()).abs() < 1e-12);
    }

    #[test]
    fn bounds_are_finite_and_ordered() {
        let s = series(vec![bar(date!(2024 - 03 - 01), 95.0, 120.0)]);
        let (_, bounds) = compute_layout(&s, DEFAULT_VIEWPORT_DAYS).expect("must compute");

        assert!(bounds.log_min.is_finite());
        assert!(bounds.log_max.is_finite());
        assert!(bounds.log_min < bounds.log_max);
    }

    #[test]
    fn empty_series_is_insufficient_history() {
        let err = compute_layout(&series(Vec::new()), 180).expect_err("must fail");
        assert_eq!(err, LayoutError::InsufficientHistory { days: 180 });
    }

    #[test]
    fn zero_low_cannot_be_log_scaled() {
        let s = series(vec![bar(date!(2024 - 03 - 01), 0.0, 120.0)]);
        let err = compute_layout(&s, 180).expect_err("must fail");
        assert!(matches!(err, LayoutError::NonPositiveRange { y_min, .. } if y_min == 0.0));

        // The margined extent is carried in the error and compares equal
        // for identical inputs.
        let again = compute_layout(&s, 180).expect_err("must fail");
        assert_eq!(err, again);
    }
}
