//! Persisted run configuration: the instrument list and chart tunables.
//!
//! Loaded once per run and threaded through the pipeline as an explicit
//! value; no stage reads configuration globally.

use std::path::Path;

use serde::{Deserialize, Serialize};

use chartisan_core::layout::DEFAULT_VIEWPORT_DAYS;

use crate::error::CliError;

/// One configured instrument: ticker plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    pub ticker: String,
    pub name: String,
}

/// Visual settings carried verbatim into the chart description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSettings {
    pub template: String,
    pub height: u32,
    pub volume_bar_color: String,
}

/// Chart tunables shared by every instrument in the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSettings {
    /// History length requested from the fetch source, in calendar days.
    pub data_range_days: u32,
    /// EMA spans; order determines draw order and color pairing.
    pub ema_windows: Vec<u32>,
    /// Paired with `ema_windows` by position.
    pub ema_colors: Vec<String>,
    /// Initial visible window in calendar days.
    #[serde(default = "default_view_days")]
    pub initial_view_days: u32,
    pub layout_settings: LayoutSettings,
}

fn default_view_days() -> u32 {
    DEFAULT_VIEWPORT_DAYS
}

/// Top-level run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub stocks_to_analyze: Vec<InstrumentConfig>,
    pub chart_settings: ChartSettings,
}

/// Load and parse the configuration file.
///
/// An absent file and malformed JSON are distinct failures; both abort
/// the run before any instrument is processed.
pub fn load(path: &Path) -> Result<AppConfig, CliError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            return Err(CliError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(error) => return Err(CliError::Io(error)),
    };

    serde_json::from_str(&raw).map_err(CliError::ConfigMalformed)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE_CONFIG: &str = r#"{
        "stocks_to_analyze": [
            { "ticker": "9434.T", "name": "SoftBank" },
            { "ticker": "AAPL", "name": "Apple" }
        ],
        "chart_settings": {
            "data_range_days": 730,
            "ema_windows": [5, 13, 25, 75, 130, 260],
            "ema_colors": ["blue", "yellow", "orange", "green", "purple", "red"],
            "layout_settings": {
                "template": "plotly_dark",
                "height": 700,
                "volume_bar_color": "rgba(255, 255, 255, 0.5)"
            }
        }
    }"#;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn loads_the_documented_schema() {
        let file = write_config(SAMPLE_CONFIG);
        let config = load(file.path()).expect("must load");

        assert_eq!(config.stocks_to_analyze.len(), 2);
        assert_eq!(config.stocks_to_analyze[0].ticker, "9434.T");
        assert_eq!(config.chart_settings.ema_windows.len(), 6);
        assert_eq!(config.chart_settings.layout_settings.height, 700);
        // Viewport length defaults when not configured.
        assert_eq!(config.chart_settings.initial_view_days, 180);
    }

    #[test]
    fn absent_file_is_config_not_found() {
        let err = load(Path::new("/definitely/not/here.json")).expect_err("must fail");
        assert!(matches!(err, CliError::ConfigNotFound { .. }));
    }

    #[test]
    fn malformed_json_is_config_malformed() {
        let file = write_config("{ not json");
        let err = load(file.path()).expect_err("must fail");
        assert!(matches!(err, CliError::ConfigMalformed(_)));
    }
}
