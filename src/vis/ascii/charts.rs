//! Chart implementations for text-based visualization

use super::{min_max, Chart, ChartConfig, ChartStyle};

// ============================================================================
// Bar Chart
// ============================================================================

/// Configuration for bar chart
#[derive(Debug, Clone)]
pub struct BarChartConfig {
    /// Base chart config
    pub base: ChartConfig,
    /// Chart style
    pub style: ChartStyle,
    /// Show values on bars
    pub show_values: bool,
    /// Max label width
    pub label_width: usize,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            base: ChartConfig::default(),
            style: ChartStyle::Unicode,
            show_values: true,
            label_width: 8,
        }
    }
}

/// Horizontal bar chart for categorical data, with optional min/max
/// ranges printed after each bar
#[derive(Debug, Clone)]
pub struct BarChart {
    /// Labels for each bar
    labels: Vec<String>,
    /// Values for each bar
    values: Vec<f64>,
    /// (min, max) per bar
    ranges: Option<Vec<(f64, f64)>>,
    /// Configuration
    config: BarChartConfig,
}

impl BarChart {
    /// Create a new bar chart
    pub fn new(labels: &[&str], values: &[f64]) -> Self {
        Self::with_config(labels, values, BarChartConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(labels: &[&str], values: &[f64], config: BarChartConfig) -> Self {
        Self {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            values: values.to_vec(),
            ranges: None,
            config,
        }
    }

    /// Attach a (min, max) range to each bar
    pub fn with_ranges(mut self, ranges: &[(f64, f64)]) -> Self {
        self.ranges = Some(ranges.to_vec());
        self
    }

    fn get_bar_char(&self) -> char {
        match self.config.style {
            ChartStyle::Ascii => '#',
            ChartStyle::Unicode => '█',
        }
    }
}

impl Chart for BarChart {
    fn render(&self) -> String {
        if self.values.is_empty() {
            return String::from("No data to display");
        }

        let mut output = String::new();
        let (_, max_val) = min_max(&self.values);
        let bar_width = self
            .config
            .base
            .width
            .saturating_sub(self.config.label_width + 10);
        let bar_char = self.get_bar_char();

        // Title
        if let Some(ref title) = self.config.base.title {
            output.push_str(&format!(
                "{:^width$}\n\n",
                title,
                width = self.config.base.width
            ));
        }

        for (i, (label, &value)) in self.labels.iter().zip(self.values.iter()).enumerate() {
            // bars grow from zero; negative values get an empty bar
            let bar_len = if max_val > 0.0 {
                (value.max(0.0) / max_val * bar_width as f64).round() as usize
            } else {
                0
            };

            let bar: String = std::iter::repeat(bar_char).take(bar_len).collect();
            let truncated_label: String = label.chars().take(self.config.label_width).collect();

            output.push_str(&format!(
                "{:>label_width$} │{:<bar_width$}│",
                truncated_label,
                bar,
                label_width = self.config.label_width,
                bar_width = bar_width
            ));

            if self.config.show_values {
                output.push_str(&format!(" {:.2}", value));
            }

            if let Some((min, max)) = self.ranges.as_ref().and_then(|r| r.get(i)) {
                output.push_str(&format!(" [{:.2} .. {:.2}]", min, max));
            }

            output.push('\n');
        }

        if let Some(ref y_label) = self.config.base.y_label {
            output.push_str(&format!(
                "{:>label_width$}  {}\n",
                "",
                y_label,
                label_width = self.config.label_width
            ));
        }

        output
    }
}

// ============================================================================
// Line Plot
// ============================================================================

/// Configuration for line plot
#[derive(Debug, Clone)]
pub struct LinePlotConfig {
    /// Base chart config
    pub base: ChartConfig,
    /// Chart style
    pub style: ChartStyle,
}

impl Default for LinePlotConfig {
    fn default() -> Self {
        Self {
            base: ChartConfig::default(),
            style: ChartStyle::Unicode,
        }
    }
}

/// Line plot over labelled x positions.
///
/// Points from `forecast_from` onwards are drawn with a distinct marker so
/// observed and predicted values can be told apart.
#[derive(Debug, Clone)]
pub struct LinePlot {
    /// Data values
    values: Vec<f64>,
    /// Label per value (e.g. the year)
    x_labels: Vec<String>,
    /// Index of the first forecast point
    forecast_from: Option<usize>,
    /// Configuration
    config: LinePlotConfig,
}

impl LinePlot {
    /// Create a new line plot
    pub fn new(values: &[f64]) -> Self {
        Self::with_config(values, LinePlotConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(values: &[f64], config: LinePlotConfig) -> Self {
        Self {
            values: values.to_vec(),
            x_labels: Vec::new(),
            forecast_from: None,
            config,
        }
    }

    /// Label the x positions
    pub fn with_x_labels<S: ToString>(mut self, labels: &[S]) -> Self {
        self.x_labels = labels.iter().map(|l| l.to_string()).collect();
        self
    }

    /// Mark values at `index` and after as forecast
    pub fn with_forecast_from(mut self, index: usize) -> Self {
        self.forecast_from = Some(index);
        self
    }

    fn markers(&self) -> (char, char) {
        match self.config.style {
            ChartStyle::Ascii => ('*', 'o'),
            ChartStyle::Unicode => ('●', '○'),
        }
    }

    fn is_forecast(&self, index: usize) -> bool {
        self.forecast_from.map_or(false, |from| index >= from)
    }
}

impl Chart for LinePlot {
    fn render(&self) -> String {
        if self.values.is_empty() {
            return String::from("No data to display");
        }

        let n = self.values.len();
        let height = self.config.base.height.max(2);
        let width = self.config.base.width.max(n).max(2);
        let (observed_char, forecast_char) = self.markers();

        let (min_val, max_val) = min_max(&self.values);
        let range = if (max_val - min_val).abs() < f64::EPSILON {
            1.0
        } else {
            max_val - min_val
        };

        // Spread points evenly over the width
        let column = |i: usize| if n == 1 { 0 } else { i * (width - 1) / (n - 1) };

        let mut grid = vec![vec![' '; width]; height];
        for (i, &value) in self.values.iter().enumerate() {
            let row = ((value - min_val) / range * (height - 1) as f64).round() as usize;
            let marker = if self.is_forecast(i) {
                forecast_char
            } else {
                observed_char
            };
            grid[row.min(height - 1)][column(i)] = marker;
        }

        let mut output = String::new();

        // Title
        if let Some(ref title) = self.config.base.title {
            output.push_str(&format!("{:^width$}\n\n", title, width = width + 8));
        }

        for row in (0..height).rev() {
            if self.config.base.show_labels {
                let y_val = min_val + (row as f64 / (height - 1) as f64) * range;
                output.push_str(&format!("{:>6.1} │", y_val));
            }
            output.extend(grid[row].iter());
            output.push('\n');
        }

        // X-axis
        if self.config.base.show_labels {
            output.push_str("       └");
            output.extend(std::iter::repeat('─').take(width));
            output.push('\n');

            if let (Some(first), Some(last)) = (self.x_labels.first(), self.x_labels.last()) {
                let gap = width.saturating_sub(first.len());
                output.push_str(&format!("        {}{:>gap$}\n", first, last, gap = gap));
            }

            let mut legend = format!("        {} observed", observed_char);
            if self.forecast_from.map_or(false, |from| from < n) {
                legend.push_str(&format!("   {} forecast", forecast_char));
            }
            if let Some(ref y_label) = self.config.base.y_label {
                legend.push_str(&format!("   ({})", y_label));
            }
            output.push_str(&legend);
            output.push('\n');
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_chart_labels_and_ranges() {
        let labels = vec!["Winter", "Summer"];
        let values = vec![2.5, 21.0];
        let chart = BarChart::new(&labels, &values).with_ranges(&[(-3.0, 8.0), (15.0, 30.0)]);
        let output = chart.render();

        assert!(output.contains("Winter"));
        assert!(output.contains("21.00"));
        assert!(output.contains("[-3.00 .. 8.00]"));
        assert!(output.contains("[15.00 .. 30.00]"));
    }

    #[test]
    fn test_bar_chart_with_title() {
        let config = BarChartConfig {
            base: ChartConfig {
                title: Some("Test Chart".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let output = BarChart::with_config(&["A", "B"], &[10.0, 20.0], config).render();
        assert!(output.contains("Test Chart"));
    }

    #[test]
    fn test_bar_chart_empty() {
        let output = BarChart::new(&[], &[]).render();
        assert!(output.contains("No data"));
    }

    #[test]
    fn test_line_plot_marks_forecast() {
        let plot = LinePlot::new(&[15.0, 30.0, 45.0])
            .with_x_labels(&[2020, 2021, 2022])
            .with_forecast_from(2);
        let output = plot.render();

        assert_eq!(output.matches('●').count(), 2 + 1); // two points plus legend
        assert_eq!(output.matches('○').count(), 1 + 1);
        assert!(output.contains("2020"));
        assert!(output.contains("2022"));
        assert!(output.contains("forecast"));
    }

    #[test]
    fn test_line_plot_flat_and_single() {
        let output = LinePlot::new(&[5.0]).render();
        assert_eq!(output.matches('●').count(), 2);
        assert!(!output.contains("forecast"));

        let output = LinePlot::new(&[3.0, 3.0, 3.0]).render();
        assert!(!output.is_empty());
    }

    #[test]
    fn test_line_plot_ascii_style() {
        let config = LinePlotConfig {
            style: ChartStyle::Ascii,
            ..Default::default()
        };
        let output = LinePlot::with_config(&[1.0, 2.0], config)
            .with_forecast_from(1)
            .render();
        assert!(output.contains('*'));
        assert!(output.contains('o'));
    }
}
