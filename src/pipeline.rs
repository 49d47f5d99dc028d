//! End-to-end analysis run
//!
//! load → aggregate → forecast → validate → render/export. A forecast that
//! fails validation stops the run before anything is rendered or exported.

use std::fmt;

use chrono::NaiveDate;
use serde_json::json;

use crate::config::AnalysisConfig;
use crate::dataset::{Dataset, Metric};
use crate::error::{Error, Result};
use crate::groupby::{seasonal_stats, yearly_average};
use crate::io::{append_results, read_weather_csv};
use crate::report::{flatten_results, AnalysisResults};
use crate::time_series::extrapolate;
use crate::validation::{is_integer_sequence, is_numeric_sequence, validate_forecast};
use crate::vis::{plot_future_trend, plot_seasonal_comparison, plot_yearly_trends, ChartConfig};

/// Aggregate, forecast and validate one metric
pub fn analyze(dataset: &Dataset, metric: Metric, periods: usize) -> Result<AnalysisResults> {
    let yearly_trends = yearly_average(dataset, metric);
    let seasonal_comparison = seasonal_stats(dataset, metric);
    log::info!(
        "{}: {} yearly averages, {} seasons",
        metric,
        yearly_trends.len(),
        seasonal_comparison.len()
    );

    let future_predictions = extrapolate(&yearly_trends, periods)?;
    validate_forecast(&future_predictions)?;

    Ok(AnalysisResults {
        metric,
        yearly_trends,
        seasonal_comparison,
        future_predictions,
    })
}

/// All three charts of a result, separated by blank lines
pub fn render_charts(results: &AnalysisResults, chart: &ChartConfig) -> String {
    [
        plot_yearly_trends(&results.yearly_trends, results.metric, chart),
        plot_seasonal_comparison(&results.seasonal_comparison, results.metric, chart),
        plot_future_trend(&results.future_predictions, results.metric, chart),
    ]
    .join("\n")
}

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub results: AnalysisResults,
    /// Rendered charts, when plotting is enabled
    pub charts: Option<String>,
    /// Rows appended to the export file
    pub exported_rows: usize,
}

/// Run the configured analysis, stamping exported rows with `analysis_date`
pub fn run(config: &AnalysisConfig, analysis_date: NaiveDate) -> Result<RunOutcome> {
    config.validate()?;

    let dataset = read_weather_csv(&config.data_path)?;
    if dataset.is_empty() {
        return Err(Error::EmptyData(format!(
            "no usable rows in {}",
            config.data_path.display()
        )));
    }
    log::info!("loaded {} records", dataset.len());

    let results = analyze(&dataset, config.metric, config.periods)?;

    let charts = if config.plot {
        Some(render_charts(&results, &config.chart.to_chart_config()))
    } else {
        None
    };

    let exported_rows = if config.export {
        let rows = flatten_results(&results, analysis_date);
        append_results(&config.export_path, &rows)?;
        rows.len()
    } else {
        0
    };

    Ok(RunOutcome {
        results,
        charts,
        exported_rows,
    })
}

/// Outcome of a single self-check
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub name: String,
    pub passed: bool,
    pub detail: Option<String>,
}

impl CheckOutcome {
    fn pass(name: impl Into<String>) -> Self {
        CheckOutcome {
            name: name.into(),
            passed: true,
            detail: None,
        }
    }

    fn fail(name: impl Into<String>, detail: impl Into<String>) -> Self {
        CheckOutcome {
            name: name.into(),
            passed: false,
            detail: Some(detail.into()),
        }
    }

    fn from_result(name: String, result: std::result::Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::pass(name),
            Err(detail) => Self::fail(name, detail),
        }
    }
}

/// Results of the self-check battery
#[derive(Debug, Clone, Default)]
pub struct SelfCheckReport {
    pub checks: Vec<CheckOutcome>,
}

impl SelfCheckReport {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

impl fmt::Display for SelfCheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for check in &self.checks {
            let status = if check.passed { "PASS" } else { "FAIL" };
            match &check.detail {
                Some(detail) => writeln!(f, "[{}] {}: {}", status, check.name, detail)?,
                None => writeln!(f, "[{}] {}", status, check.name)?,
            }
        }
        let passed = self.checks.iter().filter(|c| c.passed).count();
        write!(f, "{}/{} checks passed", passed, self.checks.len())
    }
}

/// Run the fixed battery of checks over every metric of `dataset`
pub fn run_self_checks(dataset: &Dataset, periods: usize) -> SelfCheckReport {
    let mut report = SelfCheckReport::default();

    for metric in Metric::ALL {
        report.checks.push(CheckOutcome::from_result(
            format!("{}: yearly averages", metric),
            check_yearly(dataset, metric),
        ));
        report.checks.push(CheckOutcome::from_result(
            format!("{}: seasonal statistics", metric),
            check_seasonal(dataset, metric),
        ));
        report.checks.push(CheckOutcome::from_result(
            format!("{}: forecast", metric),
            check_forecast(dataset, metric, periods),
        ));
    }

    report.checks.push(CheckOutcome::from_result(
        "validator: float sequences".to_string(),
        check_float_validator(),
    ));
    report.checks.push(CheckOutcome::from_result(
        "validator: integer sequences".to_string(),
        check_integer_validator(),
    ));

    for failure in report.failures() {
        log::warn!("self-check failed: {}", failure.name);
    }
    report
}

fn check_yearly(dataset: &Dataset, metric: Metric) -> std::result::Result<(), String> {
    let yearly = yearly_average(dataset, metric);
    if yearly.is_empty() {
        return Err("no yearly averages".into());
    }
    if yearly.len() != dataset.years().len() {
        return Err(format!(
            "{} averages for {} distinct years",
            yearly.len(),
            dataset.years().len()
        ));
    }
    if let Some((year, value)) = yearly.iter().find(|(_, v)| !v.is_finite()) {
        return Err(format!("non-finite average {} for {}", value, year));
    }
    Ok(())
}

fn check_seasonal(dataset: &Dataset, metric: Metric) -> std::result::Result<(), String> {
    let summary = seasonal_stats(dataset, metric);
    if summary.is_empty() {
        return Err("no seasonal statistics".into());
    }
    for (season, stats) in summary.iter() {
        if !(stats.min <= stats.mean && stats.mean <= stats.max) {
            return Err(format!(
                "{}: expected min <= mean <= max, got {} / {} / {}",
                season, stats.min, stats.mean, stats.max
            ));
        }
    }
    Ok(())
}

fn check_forecast(
    dataset: &Dataset,
    metric: Metric,
    periods: usize,
) -> std::result::Result<(), String> {
    let yearly = yearly_average(dataset, metric);
    let forecast = extrapolate(&yearly, periods).map_err(|e| e.to_string())?;
    if forecast.len() != yearly.len() + periods {
        return Err(format!(
            "expected {} points, got {}",
            yearly.len() + periods,
            forecast.len()
        ));
    }
    validate_forecast(&forecast).map_err(|e| e.to_string())
}

fn check_float_validator() -> std::result::Result<(), String> {
    let cases = [
        (json!([23.5, 24.1, 25.0]), true),
        (json!([23, 24, 25]), false),
        (json!("not a list"), false),
        (json!([]), true),
    ];
    for (value, expected) in cases {
        if is_numeric_sequence(&value) != expected {
            return Err(format!("{} should be {}", value, verdict(expected)));
        }
    }
    Ok(())
}

fn check_integer_validator() -> std::result::Result<(), String> {
    let cases = [
        (json!([2020, 2021, 2022]), true),
        (json!([2020.5, 2021.5]), false),
        (json!("not a list"), false),
        (json!([]), true),
    ];
    for (value, expected) in cases {
        if is_integer_sequence(&value) != expected {
            return Err(format!("{} should be {}", value, verdict(expected)));
        }
    }
    Ok(())
}

fn verdict(valid: bool) -> &'static str {
    if valid {
        "valid"
    } else {
        "invalid"
    }
}
