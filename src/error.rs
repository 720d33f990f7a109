use thiserror::Error;

/// Fatal dataset problems detected while loading or preparing records.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("dataset is missing required column '{0}'")]
    MissingColumn(String),
    #[error("row {row}: column '{column}' must be numeric, found '{value}'")]
    NonNumeric {
        row: usize,
        column: String,
        value: String,
    },
    #[error("conversion rate must be positive and finite, got {0}")]
    InvalidRate(f64),
    #[error("unsupported dataset format: .{0}")]
    UnsupportedFormat(String),
}
