use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;

use crate::dataset::{Dataset, Season, WeatherRecord};
use crate::error::{Error, Result};

/// Columns every weather CSV must provide
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "date",
    "temperature",
    "rainfall",
    "humidity",
    "season",
    "month",
    "year",
];

/// Date format of the `date` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw CSV row. Empty cells deserialize to `None`; `month` and `year` are
/// not read because they are derived from `date`.
#[derive(Debug, Deserialize)]
struct RawRow {
    date: Option<String>,
    temperature: Option<f64>,
    rainfall: Option<f64>,
    humidity: Option<f64>,
    season: Option<String>,
}

/// Read a weather CSV file into a [`Dataset`]
///
/// Rows with any missing value (empty cell or `NaN`) are dropped with a
/// warning. Missing columns, unparseable dates or seasons and non-numeric
/// measurements are errors.
pub fn read_weather_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let file = File::open(path.as_ref()).map_err(Error::Io)?;
    log::info!("loading weather data from {}", path.as_ref().display());
    read_weather(file)
}

/// Read weather CSV data from any reader
pub fn read_weather<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(Error::Csv)?.clone();
    check_columns(&headers)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for result in rdr.records() {
        let raw = result.map_err(Error::Csv)?;
        let line = raw.position().map_or(0, |p| p.line());
        let row: RawRow = raw.deserialize(Some(&headers)).map_err(Error::Csv)?;

        match parse_row(row, line)? {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::warn!(
            "missing values found in the dataset: dropped {} rows, {} rows remaining",
            dropped,
            records.len()
        );
    }

    Ok(Dataset::new(records))
}

fn check_columns(headers: &StringRecord) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}

/// `Ok(None)` when the row has a missing value and should be dropped
fn parse_row(row: RawRow, line: u64) -> Result<Option<WeatherRecord>> {
    let present = |v: Option<f64>| v.filter(|x| !x.is_nan());

    let (Some(date), Some(temperature), Some(rainfall), Some(humidity), Some(season)) = (
        row.date,
        present(row.temperature),
        present(row.rainfall),
        present(row.humidity),
        row.season,
    ) else {
        return Ok(None);
    };

    let date = NaiveDate::parse_from_str(&date, DATE_FORMAT).map_err(|e| Error::Parse {
        line,
        message: format!("invalid date '{}': {}", date, e),
    })?;

    let season = season.parse::<Season>().map_err(|_| Error::Parse {
        line,
        message: format!("invalid season '{}'", season),
    })?;

    Ok(Some(WeatherRecord::new(
        date,
        temperature,
        rainfall,
        humidity,
        season,
    )))
}
