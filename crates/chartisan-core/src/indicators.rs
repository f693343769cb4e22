//! Exponential moving averages over a normalized bar series.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::BarSeries;

/// A configured indicator overlay: window span plus display color.
///
/// List order determines draw order and legend/color pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorWindow {
    pub span: u32,
    pub color: String,
}

impl IndicatorWindow {
    pub fn new(span: u32, color: impl Into<String>) -> Result<Self, ValidationError> {
        if span == 0 {
            return Err(ValidationError::ZeroIndicatorSpan);
        }
        Ok(Self {
            span,
            color: color.into(),
        })
    }
}

/// One EMA value per bar of the owning series, tagged with its window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmaSeries {
    pub window: IndicatorWindow,
    pub values: Vec<f64>,
}

/// Pair configured spans with colors by position.
///
/// When the color list is shorter than the span list, spans beyond the
/// color list are dropped (shortest-list truncation, inherited behavior).
pub fn indicator_windows(
    spans: &[u32],
    colors: &[String],
) -> Result<Vec<IndicatorWindow>, ValidationError> {
    spans
        .iter()
        .zip(colors.iter())
        .map(|(span, color)| IndicatorWindow::new(*span, color.clone()))
        .collect()
}

/// EMA recurrence: alpha = 2/(W+1), seeded with the first close.
///
/// EMA[0] = Close[0]; EMA[t] = alpha * Close[t] + (1 - alpha) * EMA[t-1].
/// No warm-up period. An empty input yields an empty output.
pub fn compute_ema(closes: &[f64], span: u32) -> Vec<f64> {
    let alpha = 2.0 / (f64::from(span) + 1.0);
    let mut values = Vec::with_capacity(closes.len());

    for (index, close) in closes.iter().enumerate() {
        if index == 0 {
            values.push(*close);
        } else {
            let previous = values[index - 1];
            values.push(alpha * close + (1.0 - alpha) * previous);
        }
    }

    values
}

/// Compute one [`EmaSeries`] per window, each aligned to the series.
pub fn compute_all(series: &BarSeries, windows: &[IndicatorWindow]) -> Vec<EmaSeries> {
    let closes = series.closes();
    windows
        .iter()
        .map(|window| EmaSeries {
            window: window.clone(),
            values: compute_ema(&closes, window.span),
        })
        .collect()
}
