//! Result formatting and flattening
//!
//! [`AnalysisResults`] bundles the three analyses of one metric. It can be
//! printed as indented text or flattened into one [`ExportRow`] per
//! `(analysis_type, category)` pair for the CSV export.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::dataset::Metric;
use crate::groupby::{SeasonalSummary, YearlySeries};
use crate::time_series::ForecastResult;

/// Outputs of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResults {
    pub metric: Metric,
    pub yearly_trends: YearlySeries,
    pub seasonal_comparison: SeasonalSummary,
    pub future_predictions: ForecastResult,
}

/// Kind of analysis an exported value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    YearlyTrends,
    SeasonalComparison,
    FuturePredictions,
}

impl AnalysisType {
    pub fn heading(&self) -> &'static str {
        match self {
            AnalysisType::YearlyTrends => "Yearly Trends",
            AnalysisType::SeasonalComparison => "Seasonal Comparison",
            AnalysisType::FuturePredictions => "Future Predictions",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

/// One line of the flat results file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub analysis_date: NaiveDate,
    pub metric: Metric,
    pub analysis_type: AnalysisType,
    pub category: String,
    pub value: f64,
}

impl fmt::Display for AnalysisResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", AnalysisType::YearlyTrends)?;
        for (year, value) in self.yearly_trends.iter() {
            writeln!(f, "  {}: {:.2}", year, value)?;
        }

        writeln!(f, "{}:", AnalysisType::SeasonalComparison)?;
        for (season, stats) in self.seasonal_comparison.iter() {
            writeln!(f, "  {}:", season)?;
            writeln!(f, "    mean: {:.2}", stats.mean)?;
            writeln!(f, "    min: {:.2}", stats.min)?;
            writeln!(f, "    max: {:.2}", stats.max)?;
        }

        write!(f, "{}:", AnalysisType::FuturePredictions)?;
        let forecast = &self.future_predictions;
        for (i, (year, value)) in forecast.points().enumerate() {
            write!(f, "\n  {}: {:.2}", year, value)?;
            if i >= forecast.observed_len() {
                f.write_str(" (forecast)")?;
            }
        }
        Ok(())
    }
}

/// Render results as indented text with two decimals
pub fn format_results(results: &AnalysisResults) -> String {
    results.to_string()
}

/// Flatten results into export rows stamped with `analysis_date`.
///
/// Seasonal statistics use `<Season>_<stat>` as category, e.g.
/// `Winter_mean`; yearly and forecast rows use the year.
pub fn flatten_results(results: &AnalysisResults, analysis_date: NaiveDate) -> Vec<ExportRow> {
    let row = |analysis_type, category: String, value| ExportRow {
        analysis_date,
        metric: results.metric,
        analysis_type,
        category,
        value,
    };

    let mut rows = Vec::new();

    for (year, value) in results.yearly_trends.iter() {
        rows.push(row(AnalysisType::YearlyTrends, year.to_string(), value));
    }

    for (season, stats) in results.seasonal_comparison.iter() {
        for (stat, value) in [("mean", stats.mean), ("min", stats.min), ("max", stats.max)] {
            rows.push(row(
                AnalysisType::SeasonalComparison,
                format!("{}_{}", season, stat),
                value,
            ));
        }
    }

    for (year, value) in results.future_predictions.points() {
        rows.push(row(AnalysisType::FuturePredictions, year.to_string(), value));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, Season, WeatherRecord};
    use crate::groupby::{seasonal_stats, yearly_average};
    use crate::time_series::extrapolate;

    fn sample_results() -> AnalysisResults {
        let d = |y, m| NaiveDate::from_ymd_opt(y, m, 10).unwrap();
        let dataset = Dataset::new(vec![
            WeatherRecord::new(d(2020, 1), 10.0, 0.0, 50.0, Season::Winter),
            WeatherRecord::new(d(2020, 7), 20.0, 0.0, 50.0, Season::Summer),
            WeatherRecord::new(d(2021, 1), 30.0, 0.0, 50.0, Season::Winter),
        ]);
        let yearly = yearly_average(&dataset, Metric::Temperature);
        let forecast = extrapolate(&yearly, 1).unwrap();

        AnalysisResults {
            metric: Metric::Temperature,
            seasonal_comparison: seasonal_stats(&dataset, Metric::Temperature),
            yearly_trends: yearly,
            future_predictions: forecast,
        }
    }

    #[test]
    fn test_format_results() {
        let text = format_results(&sample_results());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Yearly Trends:");
        assert_eq!(lines[1], "  2020: 15.00");
        assert_eq!(lines[2], "  2021: 30.00");
        assert_eq!(lines[3], "Seasonal Comparison:");
        assert_eq!(lines[4], "  Winter:");
        assert_eq!(lines[5], "    mean: 20.00");
        assert!(text.contains("  2022: 45.00 (forecast)"));
        assert!(!text.contains("Spring"));
    }

    #[test]
    fn test_display_matches_format() {
        let results = sample_results();
        let text = results.to_string();

        assert_eq!(text, format_results(&results));
        assert!(text.ends_with("  2022: 45.00 (forecast)"));
        assert_eq!(text.lines().filter(|l| l.ends_with("(forecast)")).count(), 1);
    }

    #[test]
    fn test_flatten_results() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let rows = flatten_results(&sample_results(), date);

        // 2 yearly + 2 seasons x 3 stats + 3 forecast points
        assert_eq!(rows.len(), 11);
        assert!(rows.iter().all(|r| r.analysis_date == date));
        assert!(rows.iter().all(|r| r.metric == Metric::Temperature));

        let summer_max = rows
            .iter()
            .find(|r| r.category == "Summer_max")
            .unwrap();
        assert_eq!(summer_max.analysis_type, AnalysisType::SeasonalComparison);
        assert_eq!(summer_max.value, 20.0);

        let last = rows.last().unwrap();
        assert_eq!(last.analysis_type, AnalysisType::FuturePredictions);
        assert_eq!(last.category, "2022");
        assert_eq!(last.value, 45.0);
    }
}
