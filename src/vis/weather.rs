//! Charts for the weather analyses
//!
//! Each function renders one analysis result to a string; printing is left
//! to the caller.

use crate::dataset::Metric;
use crate::groupby::{SeasonalSummary, YearlySeries};
use crate::time_series::ForecastResult;

use super::ascii::{
    BarChart, BarChartConfig, Chart, ChartConfig, LinePlot, LinePlotConfig, Sparkline,
};

fn y_label(metric: Metric) -> String {
    format!("{} ({})", metric.title(), metric.unit())
}

/// Line chart of the observed yearly averages
pub fn plot_yearly_trends(series: &YearlySeries, metric: Metric, base: &ChartConfig) -> String {
    let config = LinePlotConfig {
        base: ChartConfig {
            title: Some(format!("Yearly {} Trends", metric.title())),
            y_label: Some(y_label(metric)),
            ..base.clone()
        },
        ..Default::default()
    };

    LinePlot::with_config(&series.values(), config)
        .with_x_labels(&series.years())
        .render()
}

/// Bar chart of seasonal means annotated with the seasonal min/max
pub fn plot_seasonal_comparison(
    summary: &SeasonalSummary,
    metric: Metric,
    base: &ChartConfig,
) -> String {
    let labels: Vec<&str> = summary.iter().map(|(season, _)| season.as_str()).collect();
    let means: Vec<f64> = summary.iter().map(|(_, stats)| stats.mean).collect();
    let ranges: Vec<(f64, f64)> = summary
        .iter()
        .map(|(_, stats)| (stats.min, stats.max))
        .collect();

    let config = BarChartConfig {
        base: ChartConfig {
            title: Some(format!("Seasonal Comparison of {}", metric.title())),
            y_label: Some(format!("mean {} [min .. max]", y_label(metric))),
            ..base.clone()
        },
        ..Default::default()
    };

    BarChart::with_config(&labels, &means, config)
        .with_ranges(&ranges)
        .render()
}

/// Line chart of the extended series with forecast points marked, followed
/// by a sparkline summary
pub fn plot_future_trend(forecast: &ForecastResult, metric: Metric, base: &ChartConfig) -> String {
    let config = LinePlotConfig {
        base: ChartConfig {
            title: Some(format!("Future Trend of {}", metric.title())),
            y_label: Some(y_label(metric)),
            ..base.clone()
        },
        ..Default::default()
    };

    let values = forecast.values().as_slice();
    let mut output = LinePlot::with_config(values, config)
        .with_x_labels(forecast.years().as_slice())
        .with_forecast_from(forecast.observed_len())
        .render();

    let spark = Sparkline::new(values).with_forecast_from(forecast.observed_len());
    output.push_str(&format!("        {}\n", spark.to_string_with_stats()));
    output
}
