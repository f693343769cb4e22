//! # Chartisan Core
//!
//! Chart pipeline for daily candlestick documents: raw upstream tables are
//! canonicalized, decorated with EMA overlays, framed by a log-scale
//! viewport, and assembled into a render-ready chart description.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Bar source adapters (Yahoo Finance) |
//! | [`compose`] | Chart composer producing trace/layout JSON |
//! | [`data_source`] | Bar source trait and request types |
//! | [`domain`] | Domain models (Symbol, Bar, BarSeries) |
//! | [`error`] | Per-stage error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`indicators`] | EMA indicator engine |
//! | [`layout`] | Viewport and log-axis bounds calculator |
//! | [`normalize`] | Column-shape normalizer |
//! | [`raw`] | Shape-tolerant upstream table model |
//!
//! ## Pipeline
//!
//! ```text
//! BarSource ──▶ RawTable ──▶ normalize ──▶ BarSeries
//!                                             │
//!                              ┌──────────────┤
//!                              ▼              ▼
//!                        compute_all    compute_layout
//!                              │              │
//!                              └──────┬───────┘
//!                                     ▼
//!                                 compose ──▶ ChartDescription
//! ```
//!
//! Every entity is created fresh per instrument per invocation; nothing is
//! cached or mutated across runs.

pub mod adapters;
pub mod compose;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod indicators;
pub mod layout;
pub mod normalize;
pub mod raw;

pub use adapters::YahooAdapter;
pub use compose::{compose, ChartDescription, DisplaySettings};
pub use data_source::{BarSource, DailyBarsRequest, SourceError, SourceErrorKind};
pub use domain::{iso_date, Bar, BarSeries, Symbol};
pub use error::{ComposeError, LayoutError, NormalizeError, ValidationError};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient};
pub use indicators::{compute_all, compute_ema, indicator_windows, EmaSeries, IndicatorWindow};
pub use layout::{compute_layout, AxisBounds, Viewport, DEFAULT_VIEWPORT_DAYS};
pub use normalize::{normalize, CANONICAL_FIELDS};
pub use raw::{ColumnLabel, RawColumn, RawTable};
