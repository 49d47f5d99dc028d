// Simple linear regression

use serde::Serialize;

use crate::error::{Error, Result};

/// Fitted line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination over the fitted points
    pub r_squared: f64,
}

impl LinearFit {
    /// Ordinary least squares fit of `ys` against `xs`.
    ///
    /// When all `xs` are equal (in particular with a single point) the
    /// slope is undetermined and the fit is the horizontal line through
    /// the mean of `ys`, which is the minimum-norm least squares solution.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(Error::DimensionMismatch(format!(
                "regression inputs differ in length: x={}, y={}",
                xs.len(),
                ys.len()
            )));
        }

        if xs.is_empty() {
            return Err(Error::InsufficientData(
                "linear regression needs at least one point".into(),
            ));
        }

        let n = xs.len() as f64;
        let mean_x = xs.iter().sum::<f64>() / n;
        let mean_y = ys.iter().sum::<f64>() / n;

        // Σ(xi - x̄)(yi - ȳ) and Σ(xi - x̄)²
        let sxy = xs
            .iter()
            .zip(ys.iter())
            .map(|(&x, &y)| (x - mean_x) * (y - mean_y))
            .sum::<f64>();
        let sxx = xs.iter().map(|&x| (x - mean_x).powi(2)).sum::<f64>();

        let slope = if sxx.abs() < f64::EPSILON { 0.0 } else { sxy / sxx };
        let intercept = mean_y - slope * mean_x;

        let ss_total = ys.iter().map(|&y| (y - mean_y).powi(2)).sum::<f64>();
        let ss_residual = xs
            .iter()
            .zip(ys.iter())
            .map(|(&x, &y)| (y - (slope * x + intercept)).powi(2))
            .sum::<f64>();

        // a constant series is fitted exactly
        let r_squared = if ss_total.abs() < f64::EPSILON {
            1.0
        } else {
            1.0 - ss_residual / ss_total
        };

        Ok(LinearFit {
            slope,
            intercept,
            r_squared,
        })
    }

    /// Evaluate the line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_regression() {
        // y = 2x
        let xs = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = vec![2.0, 4.0, 6.0, 8.0, 10.0];

        let fit = LinearFit::fit(&xs, &ys).unwrap();
        assert!((fit.intercept - 0.0).abs() < 1e-10);
        assert!((fit.slope - 2.0).abs() < 1e-10);
        assert!((fit.r_squared - 1.0).abs() < 1e-10);
        assert!((fit.predict(6.0) - 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_noisy_regression() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![1.0, 3.0, 2.0, 4.0];

        // x̄ = 1.5, ȳ = 2.5, Sxy = 4.0, Sxx = 5.0
        let fit = LinearFit::fit(&xs, &ys).unwrap();
        assert!((fit.slope - 0.8).abs() < 1e-10);
        assert!((fit.intercept - 1.3).abs() < 1e-10);
        assert!(fit.r_squared > 0.0 && fit.r_squared < 1.0);
    }

    #[test]
    fn test_single_point_is_flat() {
        let fit = LinearFit::fit(&[0.0], &[7.5]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 7.5);
        assert_eq!(fit.predict(3.0), 7.5);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            LinearFit::fit(&[0.0, 1.0], &[1.0]),
            Err(Error::DimensionMismatch(_))
        ));
        assert!(matches!(
            LinearFit::fit(&[], &[]),
            Err(Error::InsufficientData(_))
        ));
    }
}
