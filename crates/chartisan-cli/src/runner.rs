//! Sequential batch runner.
//!
//! One instrument flows through the full pipeline at a time; a failing
//! instrument is logged and skipped so the rest of the batch still runs.
//! Only pre-pipeline failures (configuration, filter, output directory)
//! abort the whole run.

use std::path::Path;

use tracing::{info, warn};

use chartisan_core::{
    compose, compute_all, compute_layout, indicator_windows, normalize, BarSource,
    DailyBarsRequest, DisplaySettings, Symbol,
};

use crate::config::{AppConfig, InstrumentConfig};
use crate::error::CliError;
use crate::render;

/// Per-run outcome tally.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub generated: Vec<String>,
    pub skipped: Vec<String>,
}

impl RunReport {
    pub fn any_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Resolve the instruments this run covers.
///
/// Without a filter the whole configured list runs in order; with one,
/// exactly the matching instrument. A filter naming an unknown ticker is
/// a run-level failure.
pub fn select_instruments(
    config: &AppConfig,
    ticker: Option<&str>,
) -> Result<Vec<InstrumentConfig>, CliError> {
    let Some(ticker) = ticker else {
        return Ok(config.stocks_to_analyze.clone());
    };

    let selected: Vec<InstrumentConfig> = config
        .stocks_to_analyze
        .iter()
        .filter(|instrument| instrument.ticker == ticker)
        .cloned()
        .collect();

    if selected.is_empty() {
        return Err(CliError::FilterNotFound {
            ticker: ticker.to_string(),
        });
    }
    Ok(selected)
}

/// Run the pipeline for every selected instrument.
///
/// Documents are written to `out_dir` and optionally opened in the
/// default viewer. A viewer launch failure is logged, not counted as a
/// skip: the document already exists on disk.
pub async fn run_batch(
    source: &dyn BarSource,
    config: &AppConfig,
    instruments: &[InstrumentConfig],
    out_dir: &Path,
    open_documents: bool,
) -> RunReport {
    let settings = &config.chart_settings;
    let display = DisplaySettings {
        template: settings.layout_settings.template.clone(),
        height: settings.layout_settings.height,
        volume_bar_color: settings.layout_settings.volume_bar_color.clone(),
    };

    let mut report = RunReport::default();

    for instrument in instruments {
        match chart_one(source, settings, &display, instrument, out_dir).await {
            Ok(path) => {
                info!(ticker = %instrument.ticker, path = %path.display(), "chart written");
                if open_documents {
                    if let Err(error) = render::open_document(&path) {
                        warn!(ticker = %instrument.ticker, %error, "viewer launch failed");
                    }
                }
                report.generated.push(instrument.ticker.clone());
            }
            Err(reason) => {
                warn!(ticker = %instrument.ticker, %reason, "instrument skipped");
                report.skipped.push(instrument.ticker.clone());
            }
        }
    }

    report
}

async fn chart_one(
    source: &dyn BarSource,
    settings: &crate::config::ChartSettings,
    display: &DisplaySettings,
    instrument: &InstrumentConfig,
    out_dir: &Path,
) -> Result<std::path::PathBuf, String> {
    let symbol = Symbol::parse(&instrument.ticker).map_err(|e| e.to_string())?;
    let request = DailyBarsRequest::new(symbol.clone(), settings.data_range_days)
        .map_err(|e| e.to_string())?;

    let table = source.daily_bars(request).await.map_err(|e| e.to_string())?;
    let series = normalize(&symbol, &table).map_err(|e| e.to_string())?;

    let windows = indicator_windows(&settings.ema_windows, &settings.ema_colors)
        .map_err(|e| e.to_string())?;
    let emas = compute_all(&series, &windows);

    let (viewport, bounds) =
        compute_layout(&series, settings.initial_view_days).map_err(|e| e.to_string())?;

    let description = compose(
        &series,
        &instrument.name,
        &emas,
        viewport,
        bounds,
        display,
    )
    .map_err(|e| e.to_string())?;

    render::write_document(out_dir, &description).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;

    use chartisan_core::{ColumnLabel, RawColumn, RawTable, SourceError, YahooAdapter};
    use time::macros::date;

    use crate::config::{ChartSettings, LayoutSettings};

    use super::*;

    /// Returns bars for every ticker except "EMPTY" (empty table) and
    /// "DOWN" (source error).
    struct StubSource;

    impl BarSource for StubSource {
        fn id(&self) -> &'static str {
            "stub"
        }

        fn daily_bars<'a>(
            &'a self,
            req: DailyBarsRequest,
        ) -> Pin<Box<dyn Future<Output = Result<RawTable, SourceError>> + Send + 'a>> {
            Box::pin(async move {
                match req.symbol.as_str() {
                    "DOWN" => Err(SourceError::unavailable("stub outage")),
                    "EMPTY" => Ok(RawTable::default()),
                    _ => Ok(stub_table()),
                }
            })
        }
    }

    fn stub_table() -> RawTable {
        let dates = vec![
            date!(2024 - 03 - 04),
            date!(2024 - 03 - 05),
            date!(2024 - 03 - 06),
        ];
        let columns = vec![
            RawColumn::new(ColumnLabel::single("Open"), vec![10.0, 11.0, 12.0]),
            RawColumn::new(ColumnLabel::single("High"), vec![11.0, 12.0, 13.0]),
            RawColumn::new(ColumnLabel::single("Low"), vec![9.0, 10.0, 11.0]),
            RawColumn::new(ColumnLabel::single("Close"), vec![10.5, 11.5, 12.5]),
            RawColumn::new(ColumnLabel::single("Volume"), vec![1000.0, 1100.0, 900.0]),
        ];
        RawTable::new(dates, columns)
    }

    fn config_for(instruments: Vec<InstrumentConfig>) -> AppConfig {
        AppConfig {
            stocks_to_analyze: instruments,
            chart_settings: ChartSettings {
                data_range_days: 365,
                ema_windows: vec![5, 25],
                ema_colors: vec![String::from("blue"), String::from("red")],
                initial_view_days: 180,
                layout_settings: LayoutSettings {
                    template: String::from("plotly_dark"),
                    height: 700,
                    volume_bar_color: String::from("rgba(255, 255, 255, 0.5)"),
                },
            },
        }
    }

    fn instrument(ticker: &str, name: &str) -> InstrumentConfig {
        InstrumentConfig {
            ticker: ticker.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn without_a_filter_every_instrument_is_selected() {
        let config = config_for(vec![instrument("AAPL", "Apple"), instrument("MSFT", "Microsoft")]);
        let selected = select_instruments(&config, None).expect("must select");
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn a_filter_selects_exactly_the_named_instrument() {
        let config = config_for(vec![instrument("AAPL", "Apple"), instrument("MSFT", "Microsoft")]);
        let selected = select_instruments(&config, Some("MSFT")).expect("must select");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].ticker, "MSFT");
    }

    #[test]
    fn an_unknown_filter_fails_the_run() {
        let config = config_for(vec![instrument("AAPL", "Apple")]);
        let err = select_instruments(&config, Some("TSLA")).expect_err("must fail");
        assert!(matches!(err, CliError::FilterNotFound { .. }));
    }

    #[tokio::test]
    async fn a_failing_instrument_is_skipped_and_the_rest_still_chart() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config_for(vec![
            instrument("GOOD", "Good Corp"),
            instrument("EMPTY", "Hollow Inc"),
            instrument("ALSO", "Also Fine"),
        ]);

        let report = run_batch(
            &StubSource,
            &config,
            &config.stocks_to_analyze,
            dir.path(),
            false,
        )
        .await;

        assert_eq!(report.generated, vec!["GOOD", "ALSO"]);
        assert_eq!(report.skipped, vec!["EMPTY"]);
        assert!(dir.path().join("GOOD_Good_Corp.html").exists());
        assert!(dir.path().join("ALSO_Also_Fine.html").exists());
        assert!(!dir.path().join("EMPTY_Hollow_Inc.html").exists());
    }

    #[tokio::test]
    async fn a_source_outage_skips_only_the_affected_instrument() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config_for(vec![instrument("DOWN", "Offline"), instrument("UP", "Online")]);

        let report = run_batch(
            &StubSource,
            &config,
            &config.stocks_to_analyze,
            dir.path(),
            false,
        )
        .await;

        assert_eq!(report.generated, vec!["UP"]);
        assert_eq!(report.skipped, vec!["DOWN"]);
    }

    #[tokio::test]
    async fn an_invalid_ticker_in_configuration_is_a_skip_not_an_abort() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config_for(vec![instrument("BAD$TICK", "Broken"), instrument("FINE", "Fine")]);

        let report = run_batch(
            &StubSource,
            &config,
            &config.stocks_to_analyze,
            dir.path(),
            false,
        )
        .await;

        assert_eq!(report.generated, vec!["FINE"]);
        assert_eq!(report.skipped, vec!["BAD$TICK"]);
    }

    #[tokio::test]
    async fn the_offline_adapter_drives_the_full_batch() {
        let dir = tempfile::tempdir().expect("temp dir");
        let adapter = YahooAdapter::default();
        let config = config_for(vec![instrument("9434.T", "SoftBank")]);

        let report = run_batch(
            &adapter,
            &config,
            &config.stocks_to_analyze,
            dir.path(),
            false,
        )
        .await;

        assert_eq!(report.generated, vec!["9434.T"]);
        assert!(report.skipped.is_empty());
    }
}
