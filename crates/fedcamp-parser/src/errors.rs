use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no row in the report contained all required columns")]
    HeaderNotFound,

    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    #[error(
        "occupant names do not appear to be obfuscated for PII ({count} offending rows, first at data row {first_row})"
    )]
    UnobfuscatedNames { count: usize, first_row: usize },

    #[error("report contained a header row but no data rows")]
    EmptyReport,
}

impl From<csv::Error> for ReportError {
    fn from(source: csv::Error) -> Self {
        ReportError::Csv { source }
    }
}
