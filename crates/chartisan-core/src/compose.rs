//! Assembly of the render-ready chart description.
//!
//! The composer turns a normalized series, its EMA overlays, and the
//! layout parameters into the trace and layout JSON the embedded charting
//! runtime consumes. Display settings (template, height, volume bar color)
//! are carried verbatim from configuration; interpreting them is the
//! renderer's concern.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::iso_date;
use crate::error::ComposeError;
use crate::indicators::EmaSeries;
use crate::layout::{AxisBounds, Viewport};
use crate::{BarSeries, Symbol};

/// Vertical share of the price pane.
const PRICE_PANE_SHARE: f64 = 0.7;
/// Vertical share of the volume pane.
const VOLUME_PANE_SHARE: f64 = 0.3;
/// Gap between the two panes, taken out of the shared vertical space.
const PANE_GAP: f64 = 0.05;

/// Display settings carried verbatim from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub template: String,
    pub height: u32,
    pub volume_bar_color: String,
}

/// Render-ready bundle: trace groups plus axis/viewport configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDescription {
    pub symbol: Symbol,
    pub name: String,
    pub viewport: Viewport,
    pub bounds: AxisBounds,
    pub traces: Vec<Value>,
    pub layout: Value,
    pub config: Value,
}

impl ChartDescription {
    /// The `{data, layout, config}` document handed to the renderer.
    pub fn to_figure(&self) -> Value {
        json!({
            "data": self.traces,
            "layout": self.layout,
            "config": self.config,
        })
    }
}

/// Assemble the two-pane chart description.
///
/// # Errors
///
/// - [`ComposeError::EmptySeries`] when the series has no bars (the
///   caller skips the instrument rather than raising past the batch).
/// - [`ComposeError::MisalignedIndicator`] when an EMA series is not
///   index-aligned with the bars.
pub fn compose(
    series: &BarSeries,
    name: &str,
    emas: &[EmaSeries],
    viewport: Viewport,
    bounds: AxisBounds,
    display: &DisplaySettings,
) -> Result<ChartDescription, ComposeError> {
    if series.is_empty() {
        return Err(ComposeError::EmptySeries);
    }
    for ema in emas {
        if ema.values.len() != series.len() {
            return Err(ComposeError::MisalignedIndicator {
                span: ema.window.span,
                series_len: series.len(),
                ema_len: ema.values.len(),
            });
        }
    }

    let dates: Vec<String> = series.bars.iter().map(|bar| iso_date(bar.date)).collect();

    let mut traces = Vec::with_capacity(emas.len() + 2);
    traces.push(json!({
        "type": "candlestick",
        "x": dates,
        "open": series.bars.iter().map(|b| b.open).collect::<Vec<_>>(),
        "high": series.bars.iter().map(|b| b.high).collect::<Vec<_>>(),
        "low": series.bars.iter().map(|b| b.low).collect::<Vec<_>>(),
        "close": series.bars.iter().map(|b| b.close).collect::<Vec<_>>(),
        "showlegend": false,
        "xaxis": "x",
        "yaxis": "y",
    }));

    for ema in emas {
        traces.push(json!({
            "type": "scatter",
            "mode": "lines",
            "x": dates,
            "y": ema.values,
            "line": { "color": ema.window.color },
            "name": format!("EMA{}", ema.window.span),
            "showlegend": false,
            "xaxis": "x",
            "yaxis": "y",
        }));
    }

    traces.push(json!({
        "type": "bar",
        "x": dates,
        "y": series.bars.iter().map(|b| b.volume).collect::<Vec<_>>(),
        "marker": { "color": display.volume_bar_color },
        "showlegend": false,
        "xaxis": "x",
        "yaxis": "y2",
    }));

    let volume_top = VOLUME_PANE_SHARE * (1.0 - PANE_GAP);
    let price_bottom = volume_top + PANE_GAP;

    let layout = json!({
        "template": display.template,
        "height": display.height,
        "showlegend": false,
        "title": { "text": format!("<b>{} {} - daily</b>", series.symbol, name) },
        "xaxis": {
            "anchor": "y",
            "range": [iso_date(viewport.start), iso_date(viewport.end)],
            "rangeslider": { "visible": false },
            "rangebreaks": [ { "bounds": ["sat", "mon"] } ],
            "dtick": "M1",
            "tickformat": "%d/%m",
            "rangeselector": {
                "buttons": [
                    { "count": 1, "label": "1m", "step": "month", "stepmode": "backward" },
                    { "count": 6, "label": "6m", "step": "month", "stepmode": "backward" },
                    { "count": 1, "label": "1y", "step": "year", "stepmode": "backward" },
                    { "step": "all" },
                ],
            },
        },
        "yaxis": {
            "title": { "text": "Price" },
            "type": "log",
            "side": "right",
            "range": [bounds.log_min, bounds.log_max],
            "domain": [price_bottom, 1.0],
        },
        "yaxis2": {
            "title": { "text": "Volume" },
            "side": "right",
            "domain": [0.0, volume_top],
        },
    });

    let config = json!({
        "displayModeBar": true,
        "modeBarButtonsToRemove": [
            "zoom2d", "pan2d", "select2d", "lasso2d", "autoscale", "resetscale",
            "hoverclosest", "hovercompare", "togglehover", "togglespikelines",
        ],
        "modeBarActiveColor": "orange",
        "dragmode": "zoom",
    });

    Ok(ChartDescription {
        symbol: series.symbol.clone(),
        name: name.to_owned(),
        viewport,
        bounds,
        traces,
        layout,
        config,
    })
}
