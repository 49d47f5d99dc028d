//! Trend forecasting over yearly aggregates
//!
//! A first-degree least squares line is fitted to the yearly series and
//! extended a fixed number of years past the last observation.

pub mod forecasting;

pub use forecasting::{extrapolate, ForecastResult};
