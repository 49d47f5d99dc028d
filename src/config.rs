//! Analysis configuration
//!
//! Loaded from a TOML file; every key is optional and falls back to the
//! defaults below. Command line flags override file values.
//!
//! ```toml
//! data_path = "data/historical_weather.csv"
//! metric = "rainfall"
//! periods = 3
//! export_path = "results/analysis_results.csv"
//! plot = true
//! export = true
//!
//! [chart]
//! width = 72
//! height = 14
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::dataset::Metric;
use crate::error::{Error, Result};
use crate::vis::ChartConfig;

/// Chart dimensions in characters
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width: usize,
    pub height: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        ChartSettings {
            width: 60,
            height: 12,
        }
    }
}

impl ChartSettings {
    pub fn to_chart_config(&self) -> ChartConfig {
        ChartConfig {
            width: self.width,
            height: self.height,
            ..Default::default()
        }
    }
}

/// Settings for one analysis run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Weather CSV to analyse
    pub data_path: PathBuf,
    /// Column to analyse
    pub metric: Metric,
    /// Number of years to forecast
    pub periods: usize,
    /// Flat results file
    pub export_path: PathBuf,
    /// Print charts
    pub plot: bool,
    /// Append results to `export_path`
    pub export: bool,
    pub chart: ChartSettings,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            data_path: PathBuf::from("data/historical_weather.csv"),
            metric: Metric::Temperature,
            periods: 5,
            export_path: PathBuf::from("results/analysis_results.csv"),
            plot: true,
            export: true,
            chart: ChartSettings::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let table: toml::Table = s.parse()?;
        // an unknown metric is reported as such, not as a generic TOML error
        if let Some(metric) = table.get("metric").and_then(toml::Value::as_str) {
            metric.parse::<Metric>()?;
        }

        let config: AnalysisConfig = toml::Value::Table(table).try_into()?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref()).map_err(Error::Io)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.periods < 1 {
            return Err(Error::InvalidPeriods(self.periods));
        }
        if self.chart.width < 10 || self.chart.height < 2 {
            return Err(Error::Config(format!(
                "chart must be at least 10x2 characters, got {}x{}",
                self.chart.width, self.chart.height
            )));
        }
        Ok(())
    }
}
