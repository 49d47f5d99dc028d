pub mod csv;
pub mod export;

// Re-export commonly used functions
pub use self::csv::{read_weather, read_weather_csv, REQUIRED_COLUMNS};
pub use self::export::{append_results, EXPORT_COLUMNS};
