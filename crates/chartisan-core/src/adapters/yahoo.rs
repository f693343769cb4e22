//! Yahoo Finance daily-bars adapter.
//!
//! Hits the unauthenticated v8 chart endpoint and hands back a raw table
//! in the upstream's own column shape: field names as delivered, plus the
//! redundant per-ticker grouping level single-ticker responses carry. The
//! normalizer owns canonicalization; nothing is renamed here.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use time::{Date, Duration, OffsetDateTime, Weekday};

use crate::data_source::{BarSource, DailyBarsRequest, SourceError};
use crate::http_client::{HttpClient, HttpRequest, NoopHttpClient};
use crate::raw::{ColumnLabel, RawColumn, RawTable};
use crate::Symbol;

/// Yahoo adapter supporting both real API calls and a deterministic
/// offline mode (selected by the transport's mock flag).
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    use_real_api: bool,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self {
            http_client: Arc::new(NoopHttpClient),
            use_real_api: false,
        }
    }
}

impl YahooAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        let use_real_api = !http_client.is_mock();
        Self {
            http_client,
            use_real_api,
        }
    }
}

impl BarSource for YahooAdapter {
    fn id(&self) -> &'static str {
        "yahoo"
    }

    fn daily_bars<'a>(
        &'a self,
        req: DailyBarsRequest,
    ) -> Pin<Box<dyn Future<Output = Result<RawTable, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            if req.range_days == 0 {
                return Err(SourceError::invalid_request(
                    "yahoo bars request range must be greater than zero",
                ));
            }

            if self.use_real_api {
                self.fetch_real_bars(&req).await
            } else {
                Ok(fake_table(&req))
            }
        })
    }
}

impl YahooAdapter {
    async fn fetch_real_bars(&self, req: &DailyBarsRequest) -> Result<RawTable, SourceError> {
        let period2 = OffsetDateTime::now_utc().unix_timestamp();
        let period1 = period2 - i64::from(req.range_days) * 86_400;

        let endpoint = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history",
            urlencoding::encode(req.symbol.as_str()),
            period1,
            period2
        );

        let request = HttpRequest::get(endpoint)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(10_000);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| SourceError::unavailable(format!("yahoo transport error: {}", e.message())))?;

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        parse_chart_body(&response.body, &req.symbol)
    }
}

/// Parse the v8 chart payload into a raw table.
///
/// Rows missing any OHLC value are dropped; a missing volume becomes 0.
/// An empty result set parses to an empty table (the normalizer decides
/// what emptiness means).
fn parse_chart_body(body: &str, symbol: &Symbol) -> Result<RawTable, SourceError> {
    let chart_response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = &chart_response.chart.error {
        if !error.is_empty() {
            return Err(SourceError::unavailable(format!("yahoo chart API error: {error}")));
        }
    }

    let Some(result) = chart_response.chart.result.first() else {
        return Ok(RawTable::default());
    };
    let Some(timestamps) = result.timestamp.as_ref() else {
        return Ok(RawTable::default());
    };
    let quote = result
        .indicators
        .quote
        .first()
        .ok_or_else(|| SourceError::internal("no quote data in chart response"))?;

    let mut dates = Vec::with_capacity(timestamps.len());
    let mut open = Vec::with_capacity(timestamps.len());
    let mut high = Vec::with_capacity(timestamps.len());
    let mut low = Vec::with_capacity(timestamps.len());
    let mut close = Vec::with_capacity(timestamps.len());
    let mut volume = Vec::with_capacity(timestamps.len());

    for (index, &ts) in timestamps.iter().enumerate() {
        let date = OffsetDateTime::from_unix_timestamp(ts)
            .map_err(|e| SourceError::internal(format!("invalid timestamp: {e}")))?
            .date();

        if let (Some(Some(o)), Some(Some(h)), Some(Some(l)), Some(Some(c))) = (
            quote.open.get(index),
            quote.high.get(index),
            quote.low.get(index),
            quote.close.get(index),
        ) {
            dates.push(date);
            open.push(*o);
            high.push(*h);
            low.push(*l);
            close.push(*c);
            volume.push(quote.volume.get(index).copied().flatten().unwrap_or(0) as f64);
        }
    }

    let group = symbol.as_str();
    Ok(RawTable::new(
        dates,
        vec![
            RawColumn::new(ColumnLabel::nested("open", group), open),
            RawColumn::new(ColumnLabel::nested("high", group), high),
            RawColumn::new(ColumnLabel::nested("low", group), low),
            RawColumn::new(ColumnLabel::nested("close", group), close),
            RawColumn::new(ColumnLabel::nested("volume", group), volume),
        ],
    ))
}

/// Deterministic weekday-only table for offline runs and tests.
///
/// Labels use capitalized single-level names so the offline path exercises
/// the normalizer's other casing/shape quirk.
fn fake_table(req: &DailyBarsRequest) -> RawTable {
    let seed = symbol_seed(&req.symbol);
    let end = OffsetDateTime::now_utc().date();
    let start = end
        .checked_sub(Duration::days(i64::from(req.range_days)))
        .unwrap_or(Date::MIN);

    let mut dates = Vec::new();
    let mut open = Vec::new();
    let mut high = Vec::new();
    let mut low = Vec::new();
    let mut close = Vec::new();
    let mut volume = Vec::new();

    let mut date = start;
    let mut index = 0_u64;
    while date <= end {
        let is_weekend = matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday);
        if !is_weekend {
            let base = 90.0 + ((seed + index) % 350) as f64 / 10.0;
            dates.push(date);
            open.push(base);
            high.push(base + 1.20);
            low.push(base - 0.80);
            close.push(base + 0.30);
            volume.push(20_000.0 + index as f64 * 25.0);
            index += 1;
        }
        date = match date.next_day() {
            Some(next) => next,
            None => break,
        };
    }

    RawTable::new(
        dates,
        vec![
            RawColumn::new(ColumnLabel::single("Open"), open),
            RawColumn::new(ColumnLabel::single("High"), high),
            RawColumn::new(ColumnLabel::single("Low"), low),
            RawColumn::new(ColumnLabel::single("Close"), close),
            RawColumn::new(ColumnLabel::single("Volume"), volume),
        ],
    )
}

fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(byte as u64)
    })
}

// Yahoo Finance v8 chart response structures.
#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    result: Vec<YahooChartResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartQuote {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<i64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CHART_BODY: &str = r#"{
        "chart": {
            "result": [{
                "timestamp": [1709251200, 1709337600, 1709596800],
                "indicators": {
                    "quote": [{
                        "open":   [100.0, 101.0, null],
                        "high":   [102.0, 103.5, 104.0],
                        "low":    [ 99.0, 100.5, 101.0],
                        "close":  [101.0, 102.0, 103.0],
                        "volume": [150000, null, 170000]
                    }]
                }
            }]
        }
    }"#;

    fn symbol() -> Symbol {
        Symbol::parse("9434.T").expect("valid")
    }

    #[test]
    fn chart_payload_parses_to_nested_label_table() {
        let table = parse_chart_body(SAMPLE_CHART_BODY, &symbol()).expect("must parse");

        // The third row has a null open and is dropped.
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns.len(), 5);
        assert_eq!(
            table.columns[0].label,
            ColumnLabel::nested("open", "9434.T")
        );
        // Null volume becomes zero.
        assert_eq!(table.columns[4].values[1], 0.0);
    }

    #[test]
    fn empty_chart_result_parses_to_empty_table() {
        let body = r#"{"chart": {"result": []}}"#;
        let table = parse_chart_body(body, &symbol()).expect("must parse");
        assert!(table.is_empty());
    }

    #[test]
    fn chart_api_error_is_surfaced() {
        let body = r#"{"chart": {"result": [], "error": "Not Found"}}"#;
        let err = parse_chart_body(body, &symbol()).expect_err("must fail");
        assert!(err.message().contains("Not Found"));
    }

    #[tokio::test]
    async fn offline_adapter_returns_weekday_only_bars() {
        let adapter = YahooAdapter::default();
        let request = DailyBarsRequest::new(symbol(), 90).expect("valid request");

        let table = adapter.daily_bars(request).await.expect("must fetch");
        assert!(!table.is_empty());
        assert!(table
            .dates
            .iter()
            .all(|d| !matches!(d.weekday(), Weekday::Saturday | Weekday::Sunday)));
        assert_eq!(table.columns[0].label, ColumnLabel::single("Open"));
    }
}
