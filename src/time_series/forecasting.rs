//! Linear trend extrapolation of a yearly series

use serde::Serialize;

use crate::error::{Error, Result};
use crate::groupby::YearlySeries;
use crate::stats::LinearFit;
use crate::validation::{FloatSeries, IntSeries};

/// Observed yearly series extended with predicted years.
///
/// The first `observed_len()` entries are the input series unchanged; the
/// remaining `periods()` entries are synthetic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    years: IntSeries,
    values: FloatSeries,
    observed_len: usize,
    fit: LinearFit,
}

impl ForecastResult {
    pub fn years(&self) -> &IntSeries {
        &self.years
    }

    pub fn values(&self) -> &FloatSeries {
        &self.values
    }

    /// Number of observed (non-synthetic) leading entries
    pub fn observed_len(&self) -> usize {
        self.observed_len
    }

    /// Number of predicted trailing entries
    pub fn periods(&self) -> usize {
        self.years.len() - self.observed_len
    }

    /// Line fitted to the observed values over x = 0..n-1
    pub fn fit(&self) -> &LinearFit {
        &self.fit
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// All `(year, value)` pairs, observed then predicted
    pub fn points(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.years
            .as_slice()
            .iter()
            .copied()
            .zip(self.values.as_slice().iter().copied())
    }

    /// The observed `(year, value)` pairs
    pub fn observed(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.points().take(self.observed_len)
    }

    /// The predicted `(year, value)` pairs
    pub fn predicted(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.points().skip(self.observed_len)
    }
}

/// Fit a line to `series` and extend it by `periods` years.
///
/// The regression runs over the position index x = 0..n-1, not the year
/// value. Predictions are made at x = n..n+periods-1 and labelled
/// `last_year + 1 ..= last_year + periods`. A single-point series yields a
/// flat forecast at that point's value.
///
/// # Errors
///
/// [`Error::EmptySeries`] when `series` has no points and
/// [`Error::InvalidPeriods`] when `periods` is zero.
pub fn extrapolate(series: &YearlySeries, periods: usize) -> Result<ForecastResult> {
    if series.is_empty() {
        return Err(Error::EmptySeries);
    }
    if periods < 1 {
        return Err(Error::InvalidPeriods(periods));
    }

    let n = series.len();
    let mut years = series.years();
    let mut values = series.values();

    let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let fit = LinearFit::fit(&xs, &values)?;
    log::debug!(
        "fitted trend over {} years: slope={:.4}, intercept={:.4}, r²={:.4}",
        n,
        fit.slope,
        fit.intercept,
        fit.r_squared
    );

    let last_year = years[n - 1];
    for step in 0..periods {
        values.push(fit.predict((n + step) as f64));
        years.push(last_year + step as i32 + 1);
    }

    Ok(ForecastResult {
        years: IntSeries::new(years),
        values: FloatSeries::new(values),
        observed_len: n,
        fit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(i32, f64)]) -> YearlySeries {
        points.iter().copied().collect()
    }

    #[test]
    fn test_two_point_extrapolation() {
        let result = extrapolate(&series(&[(2020, 15.0), (2021, 30.0)]), 1).unwrap();

        assert_eq!(result.years().as_slice(), &[2020, 2021, 2022]);
        assert_eq!(result.values().as_slice(), &[15.0, 30.0, 45.0]);
        assert!((result.fit().slope - 15.0).abs() < 1e-10);
        assert!((result.fit().intercept - 15.0).abs() < 1e-10);
        assert_eq!(result.observed_len(), 2);
        assert_eq!(result.periods(), 1);
    }

    #[test]
    fn test_years_follow_last_observation_not_index() {
        // gap in the observed years: labels continue from 2015, x continues from 3
        let result = extrapolate(&series(&[(2000, 1.0), (2010, 2.0), (2015, 3.0)]), 2).unwrap();

        assert_eq!(result.years().as_slice(), &[2000, 2010, 2015, 2016, 2017]);
        let predicted: Vec<f64> = result.predicted().map(|(_, v)| v).collect();
        assert!((predicted[0] - 4.0).abs() < 1e-10);
        assert!((predicted[1] - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_single_point_is_flat() {
        let result = extrapolate(&series(&[(2019, 12.5)]), 3).unwrap();
        assert_eq!(result.years().as_slice(), &[2019, 2020, 2021, 2022]);
        assert_eq!(result.values().as_slice(), &[12.5, 12.5, 12.5, 12.5]);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            extrapolate(&YearlySeries::new(), 1),
            Err(Error::EmptySeries)
        ));
        assert!(matches!(
            extrapolate(&series(&[(2020, 1.0), (2021, 2.0)]), 0),
            Err(Error::InvalidPeriods(0))
        ));
    }

    #[test]
    fn test_observed_and_predicted_split() {
        let result = extrapolate(&series(&[(2020, 1.0), (2021, 3.0), (2022, 5.0)]), 2).unwrap();
        let observed: Vec<_> = result.observed().collect();
        let predicted: Vec<_> = result.predicted().collect();

        assert_eq!(observed, vec![(2020, 1.0), (2021, 3.0), (2022, 5.0)]);
        assert_eq!(predicted.len(), 2);
        assert_eq!(predicted[0].0, 2023);
        assert!((predicted[0].1 - 7.0).abs() < 1e-10);
        assert!((predicted[1].1 - 9.0).abs() < 1e-10);
    }
}
