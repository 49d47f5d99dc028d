//! Test utilities for temporary weather files
//!
//! Every test gets its own directory that is removed on drop, so tests can
//! run in parallel without sharing input or export files.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const WEATHER_HEADER: &str = "date,temperature,rainfall,humidity,month,year,season";

/// One fixture row; month and year are derived from `date` when written
#[derive(Debug, Clone)]
pub struct WeatherRow {
    pub date: &'static str,
    pub temperature: &'static str,
    pub rainfall: &'static str,
    pub humidity: &'static str,
    pub season: &'static str,
}

impl WeatherRow {
    pub const fn new(
        date: &'static str,
        temperature: &'static str,
        rainfall: &'static str,
        humidity: &'static str,
        season: &'static str,
    ) -> Self {
        WeatherRow {
            date,
            temperature,
            rainfall,
            humidity,
            season,
        }
    }

    fn to_line(&self) -> String {
        let year = self.date.get(0..4).unwrap_or("");
        let month = self
            .date
            .get(5..7)
            .map(|m| m.trim_start_matches('0'))
            .unwrap_or("");
        format!(
            "{},{},{},{},{},{},{}",
            self.date, self.temperature, self.rainfall, self.humidity, month, year, self.season
        )
    }
}

/// Two years with every season, plus a summer-only third year
pub fn sample_rows() -> Vec<WeatherRow> {
    vec![
        WeatherRow::new("2020-01-15", "2.0", "60.0", "85.0", "Winter"),
        WeatherRow::new("2020-04-15", "12.0", "45.0", "70.0", "Spring"),
        WeatherRow::new("2020-07-15", "24.0", "20.0", "55.0", "Summer"),
        WeatherRow::new("2020-10-15", "14.0", "55.0", "75.0", "Autumn"),
        WeatherRow::new("2021-01-15", "4.0", "70.0", "88.0", "Winter"),
        WeatherRow::new("2021-04-15", "13.0", "40.0", "68.0", "Spring"),
        WeatherRow::new("2021-07-15", "26.0", "15.0", "52.0", "Summer"),
        WeatherRow::new("2021-10-15", "15.0", "50.0", "72.0", "Autumn"),
        WeatherRow::new("2022-07-15", "28.0", "10.0", "50.0", "Summer"),
    ]
}

/// Write `rows` under the standard header
pub fn write_weather_csv(path: &Path, rows: &[WeatherRow]) {
    let mut file = File::create(path).expect("Failed to create test CSV");
    writeln!(file, "{}", WEATHER_HEADER).expect("Failed to write header");
    for row in rows {
        writeln!(file, "{}", row.to_line()).expect("Failed to write row");
    }
}

/// RAII temporary directory with helpers for the files a run touches
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Workspace {
            dir: tempfile::Builder::new()
                .prefix("weather_trends_test_")
                .tempdir()
                .expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a weather CSV named `name` and return its path
    pub fn weather_csv(&self, name: &str, rows: &[WeatherRow]) -> PathBuf {
        let path = self.file(name);
        write_weather_csv(&path, rows);
        path
    }

    /// Write arbitrary text, for malformed inputs
    pub fn raw_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.file(name);
        fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.file(name)).expect("Failed to read test file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_cleanup() {
        let path;
        {
            let ws = Workspace::new();
            path = ws.weather_csv("weather.csv", &sample_rows());
            assert!(path.exists());
        }
        assert!(!path.exists(), "File should be deleted after Workspace is dropped");
    }

    #[test]
    fn test_row_derives_month_and_year() {
        let row = WeatherRow::new("2021-04-15", "1", "2", "3", "Spring");
        assert_eq!(row.to_line(), "2021-04-15,1,2,3,4,2021,Spring");
    }
}
