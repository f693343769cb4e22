//! HTML document rendering, persistence, and viewer launch.
//!
//! The chart description's figure JSON is embedded into a self-contained
//! page that loads the plotly.js runtime from CDN and renders on open.
//! The pixel work and interactivity are entirely the runtime's.

use std::path::{Path, PathBuf};

use chartisan_core::ChartDescription;

use crate::error::CliError;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.32.0.min.js";

/// Output file path for a chart document: `<TICKER>_<name>.html`.
pub fn document_path(out_dir: &Path, description: &ChartDescription) -> PathBuf {
    let file_name = format!(
        "{}_{}.html",
        sanitize(description.symbol.as_str()),
        sanitize(&description.name)
    );
    out_dir.join(file_name)
}

fn sanitize(part: &str) -> String {
    part.chars()
        .map(|ch| {
            if ch.is_alphanumeric() || ch == '.' || ch == '-' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

/// Write the document, creating the output directory if absent.
pub fn write_document(
    out_dir: &Path,
    description: &ChartDescription,
) -> Result<PathBuf, CliError> {
    std::fs::create_dir_all(out_dir)?;

    let path = document_path(out_dir, description);
    // Guard against a `</script>` sequence inside embedded strings.
    let figure = serde_json::to_string(&description.to_figure())?.replace("</", "<\\/");
    let title = format!("{} {}", description.symbol, description.name);

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{PLOTLY_CDN}" charset="utf-8"></script>
<style>
  html, body {{ margin: 0; padding: 0; background: #111; }}
  #chart {{ width: 100%; }}
</style>
</head>
<body>
<div id="chart"></div>
<script>
  const figure = {figure};
  Plotly.newPlot("chart", figure.data, figure.layout, figure.config);
</script>
</body>
</html>
"#
    );

    std::fs::write(&path, html)?;
    Ok(path)
}

/// Open the written document in the default viewer.
///
/// The caller treats failure as non-fatal: the document is already on
/// disk by the time this runs.
pub fn open_document(path: &Path) -> Result<(), CliError> {
    open::that(path)?;
    Ok(())
}
