//! In-memory weather table
//!
//! A [`Dataset`] is produced once per run by the loader and is never mutated
//! afterwards. Month and year are always derived from the record's date.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Numeric column that can be analysed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Metric {
    /// Air temperature in °C
    Temperature,
    /// Precipitation in mm
    Rainfall,
    /// Relative humidity in %
    Humidity,
}

impl Metric {
    /// All metrics, in column order
    pub const ALL: [Metric; 3] = [Metric::Temperature, Metric::Rainfall, Metric::Humidity];

    /// Column name of the metric
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Temperature => "temperature",
            Metric::Rainfall => "rainfall",
            Metric::Humidity => "humidity",
        }
    }

    /// Unit suffix used in chart labels
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Temperature => "°C",
            Metric::Rainfall => "mm",
            Metric::Humidity => "%",
        }
    }

    /// Capitalized name for titles ("Temperature")
    pub fn title(&self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::Rainfall => "Rainfall",
            Metric::Humidity => "Humidity",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "temperature" => Ok(Metric::Temperature),
            "rainfall" => Ok(Metric::Rainfall),
            "humidity" => Ok(Metric::Humidity),
            _ => Err(Error::InvalidMetric(s.to_string())),
        }
    }
}

impl TryFrom<String> for Metric {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// Season label. The declaration order is the reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Autumn];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = Error;

    /// Case-insensitive; "fall" is accepted for autumn.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "winter" => Ok(Season::Winter),
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "autumn" | "fall" => Ok(Season::Autumn),
            _ => Err(Error::InvalidSeason(s.to_string())),
        }
    }
}

/// One daily observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub date: NaiveDate,
    pub temperature: f64,
    pub rainfall: f64,
    pub humidity: f64,
    pub season: Season,
}

impl WeatherRecord {
    pub fn new(
        date: NaiveDate,
        temperature: f64,
        rainfall: f64,
        humidity: f64,
        season: Season,
    ) -> Self {
        WeatherRecord {
            date,
            temperature,
            rainfall,
            humidity,
            season,
        }
    }

    /// Calendar year of the observation
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Month of the observation (1-12)
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Value of the requested metric
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Rainfall => self.rainfall,
            Metric::Humidity => self.humidity,
        }
    }
}

/// Validated weather table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<WeatherRecord>,
}

impl Dataset {
    pub fn new(records: Vec<WeatherRecord>) -> Self {
        Dataset { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeatherRecord> {
        self.records.iter()
    }

    /// Values of one metric in record order
    pub fn column(&self, metric: Metric) -> Vec<f64> {
        self.records.iter().map(|r| r.value(metric)).collect()
    }

    /// Distinct years, ascending
    pub fn years(&self) -> BTreeSet<i32> {
        self.records.iter().map(WeatherRecord::year).collect()
    }
}

impl FromIterator<WeatherRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = WeatherRecord>>(iter: I) -> Self {
        Dataset::new(iter.into_iter().collect())
    }
}
