//! Historical weather trend analysis
//!
//! Loads a weather CSV, aggregates one metric per year and per season,
//! extrapolates the yearly series with a least-squares line, validates the
//! result and renders or exports it.

pub mod config;
pub mod dataset;
pub mod error;
pub mod groupby;
pub mod io;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod time_series;
pub mod validation;
pub mod vis;

// Re-export commonly used types
pub use config::AnalysisConfig;
pub use dataset::{Dataset, Metric, Season, WeatherRecord};
pub use error::{Error, Result};
pub use groupby::{seasonal_stats, yearly_average, GroupBy, SeasonStats, SeasonalSummary, YearlySeries};
pub use pipeline::{analyze, run, run_self_checks, RunOutcome, SelfCheckReport};
pub use report::{flatten_results, format_results, AnalysisResults, AnalysisType, ExportRow};
pub use stats::LinearFit;
pub use time_series::{extrapolate, ForecastResult};
pub use validation::{is_integer_sequence, is_numeric_sequence, validate_forecast, FloatSeries, IntSeries};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
