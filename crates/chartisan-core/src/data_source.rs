//! Bar source trait and request types.
//!
//! A bar source supplies the raw per-day table for one ticker over a
//! trailing date range. The pipeline treats it as a narrow external
//! collaborator: everything past the returned [`RawTable`] is owned by
//! the normalizer.
//!
//! [`RawTable`]: crate::raw::RawTable

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::raw::RawTable;
use crate::Symbol;

/// Source-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    InvalidRequest,
    Internal,
}

/// Structured source error surfaced to the batch runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Request payload for the daily-bars endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyBarsRequest {
    pub symbol: Symbol,
    /// Trailing history length in calendar days, ending today.
    pub range_days: u32,
}

impl DailyBarsRequest {
    pub fn new(symbol: Symbol, range_days: u32) -> Result<Self, SourceError> {
        if range_days == 0 {
            return Err(SourceError::invalid_request(
                "daily bars request range must be greater than zero",
            ));
        }
        Ok(Self { symbol, range_days })
    }
}

/// Bar source contract.
///
/// Implementations must be `Send + Sync`; the method returns a boxed
/// future so trait objects can be shared across the batch runner.
pub trait BarSource: Send + Sync {
    /// Stable identifier used in logs and skip reasons.
    fn id(&self) -> &'static str;

    /// Fetch the raw daily table for one ticker over the trailing range.
    ///
    /// An empty result is a valid response; emptiness is classified by
    /// the normalizer, not here.
    fn daily_bars<'a>(
        &'a self,
        req: DailyBarsRequest,
    ) -> Pin<Box<dyn Future<Output = Result<RawTable, SourceError>> + Send + 'a>>;
}
