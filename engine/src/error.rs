use thiserror::Error;

// Only loading can fail. Parsing and aggregation always produce a value.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl DashboardError {
    /// Recovers the typed error from an `anyhow` chain raised by the CSV loader.
    pub fn from_load_error(err: anyhow::Error) -> Self {
        let err = match err.downcast::<DashboardError>() {
            Ok(typed) => return typed,
            Err(other) => other,
        };
        let err = match err.downcast::<csv::Error>() {
            Ok(source) => return Self::from_csv_error(source),
            Err(other) => other,
        };
        match err.downcast::<std::io::Error>() {
            Ok(source) => DashboardError::IoError { source },
            Err(other) => DashboardError::AnyhowError(other),
        }
    }

    /// A CSV error caused by the underlying reader is reported as I/O.
    fn from_csv_error(source: csv::Error) -> Self {
        match source.kind() {
            csv::ErrorKind::Io(io) => DashboardError::IoError {
                source: std::io::Error::new(io.kind(), io.to_string()),
            },
            _ => DashboardError::CsvSystemError { source },
        }
    }
}
