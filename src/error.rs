use thiserror::Error;

/// Error type for loading, analysing and exporting weather data
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error")]
    Io(#[source] std::io::Error),

    #[error("CSV error")]
    Csv(#[source] csv::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("parse error on line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("invalid metric '{0}': expected one of temperature, rainfall, humidity")]
    InvalidMetric(String),

    #[error("invalid season '{0}'")]
    InvalidSeason(String),

    #[error("no data: {0}")]
    EmptyData(String),

    #[error("cannot forecast an empty series")]
    EmptySeries,

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("invalid forecast horizon {0}: at least one period is required")]
    InvalidPeriods(usize),

    #[error("validation failed: {0}")]
    ValidationFailure(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Failures the command line reports and recovers from by skipping
    /// rendering and export. Everything else is treated as fatal.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Error::ValidationFailure(_)
                | Error::EmptyData(_)
                | Error::EmptySeries
                | Error::InvalidMetric(_)
                | Error::InvalidPeriods(_)
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
