//! Common test utilities module
//!
//! Temporary workspaces and weather CSV fixtures shared by the integration
//! tests.
#![allow(dead_code)]

pub mod test_utils;

pub use test_utils::{sample_rows, write_weather_csv, WeatherRow, Workspace, WEATHER_HEADER};
