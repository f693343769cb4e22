use thiserror::Error;

/// Validation and contract errors exposed by `chartisan-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("indicator window span must be greater than zero")]
    ZeroIndicatorSpan,
}

/// Failures raised while canonicalizing a raw upstream table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// The raw table carried zero rows. Reported independently of missing
    /// columns so the caller can skip the instrument without aborting the
    /// batch.
    #[error("raw series has no rows")]
    EmptyInput,

    /// One or more canonical fields could not be matched against any raw
    /// column label.
    #[error("raw series is missing required field(s): {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// A matched column's length disagrees with the date index.
    #[error("column '{field}' has {actual} values but the series has {expected} rows")]
    RaggedColumn {
        field: String,
        expected: usize,
        actual: usize,
    },
}

/// Failures raised while deriving the viewport and y-axis bounds.
///
/// `PartialEq` only: `NonPositiveRange` carries the offending f64 extent.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    /// No bar falls inside the configured viewport window.
    #[error("series too short: no bars within the trailing {days}-day viewport")]
    InsufficientHistory { days: u32 },

    /// The viewport price extent cannot be expressed on a log axis.
    #[error("viewport price range must be positive for log scaling (min={y_min}, max={y_max})")]
    NonPositiveRange { y_min: f64, y_max: f64 },
}

/// Failures raised while assembling the render-ready chart description.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComposeError {
    #[error("cannot compose a chart from an empty bar series")]
    EmptySeries,

    /// An indicator series is not aligned index-for-index with the bars.
    #[error("EMA{span} has {ema_len} values but the series has {series_len} bars")]
    MisalignedIndicator {
        span: u32,
        series_len: usize,
        ema_len: usize,
    },
}
