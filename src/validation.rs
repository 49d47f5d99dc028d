//! Strict type checks on value sequences
//!
//! Values headed for rendering or export are checked in their dynamic JSON
//! form, where a float and an integer are distinct: `[1, 2]` is not a float
//! sequence and `[2020.0]` is not an integer sequence. [`FloatSeries`] and
//! [`IntSeries`] keep that distinction on the typed side.

use serde::Serialize;
use serde_json::{Number, Value};

use crate::error::{Error, Result};
use crate::time_series::ForecastResult;

/// True iff `values` is an array of floating-point numbers.
///
/// Integer numbers, non-numbers and non-arrays are rejected; an empty
/// array is valid.
pub fn is_numeric_sequence(values: &Value) -> bool {
    match values {
        Value::Array(items) => items.iter().all(|v| matches!(v, Value::Number(n) if n.is_f64())),
        _ => false,
    }
}

/// True iff `years` is an array of integer numbers.
///
/// Floats are rejected even when integral (`2020.0`); an empty array is
/// valid.
pub fn is_integer_sequence(years: &Value) -> bool {
    match years {
        Value::Array(items) => items
            .iter()
            .all(|v| matches!(v, Value::Number(n) if n.is_i64() || n.is_u64())),
        _ => false,
    }
}

/// Sequence of floating-point values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FloatSeries(Vec<f64>);

impl FloatSeries {
    pub fn new(values: Vec<f64>) -> Self {
        FloatSeries(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dynamic form. Non-finite values have no JSON number and become `null`.
    pub fn to_json(&self) -> Value {
        Value::Array(
            self.0
                .iter()
                .map(|&v| Number::from_f64(v).map_or(Value::Null, Value::Number))
                .collect(),
        )
    }

    /// Parse a dynamic value, accepting only a float array
    pub fn from_json(value: &Value) -> Result<Self> {
        if !is_numeric_sequence(value) {
            return Err(Error::ValidationFailure(format!(
                "expected a sequence of floats, got {}",
                value
            )));
        }
        let values: Vec<f64> = value
            .as_array()
            .map(|items| items.iter().filter_map(Value::as_f64).collect())
            .unwrap_or_default();
        Ok(FloatSeries(values))
    }
}

impl From<Vec<f64>> for FloatSeries {
    fn from(values: Vec<f64>) -> Self {
        FloatSeries(values)
    }
}

/// Sequence of integer values (years)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntSeries(Vec<i32>);

impl IntSeries {
    pub fn new(values: Vec<i32>) -> Self {
        IntSeries(values)
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Value {
        Value::Array(self.0.iter().map(|&v| Value::from(v)).collect())
    }

    /// Parse a dynamic value, accepting only an integer array that fits `i32`
    pub fn from_json(value: &Value) -> Result<Self> {
        if !is_integer_sequence(value) {
            return Err(Error::ValidationFailure(format!(
                "expected a sequence of integers, got {}",
                value
            )));
        }
        let items = value.as_array().map(Vec::as_slice).unwrap_or_default();
        let mut values = Vec::with_capacity(items.len());
        for item in items {
            let v = item
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .ok_or_else(|| Error::ValidationFailure(format!("year {} out of range", item)))?;
            values.push(v);
        }
        Ok(IntSeries(values))
    }
}

impl From<Vec<i32>> for IntSeries {
    fn from(values: Vec<i32>) -> Self {
        IntSeries(values)
    }
}

/// Gate a forecast before it reaches rendering or export.
///
/// Fails with [`Error::ValidationFailure`] if the values are not all
/// (finite) floats, the years are not all integers, or the lengths differ.
pub fn validate_forecast(forecast: &ForecastResult) -> Result<()> {
    let values = forecast.values().to_json();
    if !is_numeric_sequence(&values) {
        return Err(Error::ValidationFailure(
            "forecast values are not a sequence of finite floats".into(),
        ));
    }

    let years = forecast.years().to_json();
    if !is_integer_sequence(&years) {
        return Err(Error::ValidationFailure(
            "forecast years are not a sequence of integers".into(),
        ));
    }

    if forecast.years().len() != forecast.values().len() {
        return Err(Error::ValidationFailure(format!(
            "forecast has {} years but {} values",
            forecast.years().len(),
            forecast.values().len()
        )));
    }

    Ok(())
}
