use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Per-record failure. These never abort the pipeline: the offending record
/// is excluded and the reason is reported back to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipReason {
    #[error("departure {departure} is not after arrival {arrival}")]
    InvalidDateRange {
        arrival: NaiveDate,
        departure: NaiveDate,
    },

    #[error("required field '{field}' is missing")]
    MissingField { field: &'static str },

    #[error("field '{field}' holds an unparseable date: '{value}'")]
    UnparseableDate { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedReservation {
    pub reservation_id: Option<String>,
    pub site_id: Option<String>,
    pub reason: SkipReason,
}
