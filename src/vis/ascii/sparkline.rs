//! Sparkline visualization for inline mini charts
//!
//! Used as a one-line summary under the forecast chart; the forecast part
//! of the series is separated from the observed part with `┊`.

use super::{min_max, Chart};

/// Sparkline - a compact inline chart
#[derive(Debug, Clone)]
pub struct Sparkline {
    /// Data values
    values: Vec<f64>,
    /// Index of the first forecast value
    forecast_from: Option<usize>,
}

impl Sparkline {
    /// Block characters for sparkline (8 levels)
    const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

    /// Create a new sparkline
    pub fn new(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            forecast_from: None,
        }
    }

    /// Insert a separator before the value at `index`
    pub fn with_forecast_from(mut self, index: usize) -> Self {
        self.forecast_from = Some(index);
        self
    }

    /// Get sparkline with stats
    pub fn to_string_with_stats(&self) -> String {
        if self.values.is_empty() {
            return String::from("(empty)");
        }

        let (min, max) = min_max(&self.values);
        let mean = self.values.iter().sum::<f64>() / self.values.len() as f64;

        format!(
            "{} (min: {:.2}, max: {:.2}, avg: {:.2})",
            self.render(),
            min,
            max,
            mean
        )
    }
}

impl Chart for Sparkline {
    fn render(&self) -> String {
        if self.values.is_empty() {
            return String::new();
        }

        let (min, max) = min_max(&self.values);
        let range = if (max - min).abs() < f64::EPSILON {
            1.0
        } else {
            max - min
        };

        let mut output = String::with_capacity(self.values.len() + 1);
        for (i, &v) in self.values.iter().enumerate() {
            if self.forecast_from == Some(i) && i > 0 {
                output.push('┊');
            }
            let normalized = ((v - min) / range).clamp(0.0, 1.0);
            let idx = (normalized * 7.0).round() as usize;
            output.push(Self::BLOCKS[idx.min(7)]);
        }
        output
    }
}
