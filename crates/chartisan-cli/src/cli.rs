//! CLI argument definitions for chartisan.
//!
//! One run processes every instrument in the configuration file, or a
//! single instrument when `--ticker` is given. Each successful instrument
//! produces one interactive HTML document in the output directory.
//!
//! # Examples
//!
//! ```bash
//! # Chart every configured instrument
//! chartisan
//!
//! # Chart one instrument only
//! chartisan --ticker 9434.T
//!
//! # Offline run with deterministic data, no viewer
//! chartisan --mock --no-open
//! ```

use std::path::PathBuf;

use clap::Parser;

/// Candlestick chart generator for configured instruments.
///
/// Fetches daily OHLCV history for each configured ticker, overlays
/// exponential moving averages, and writes one interactive two-pane chart
/// document per instrument.
#[derive(Debug, Parser)]
#[command(
    name = "chartisan",
    author,
    version,
    about = "Candlestick chart generator for configured instruments"
)]
pub struct Cli {
    /// Path to the JSON configuration file.
    #[arg(long, default_value = "charts.json")]
    pub config: PathBuf,

    /// Generate a chart for this configured ticker only (exact match).
    ///
    /// The run fails if the ticker is not present in the configuration.
    #[arg(long)]
    pub ticker: Option<String>,

    /// Output directory for generated documents (created if absent).
    #[arg(long, default_value = "charts")]
    pub out_dir: PathBuf,

    /// Skip opening generated documents in the default viewer.
    #[arg(long, default_value_t = false)]
    pub no_open: bool,

    /// Use the deterministic offline data source (no network calls).
    #[arg(long, default_value_t = false)]
    pub mock: bool,
}
