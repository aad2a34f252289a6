//! Error types for parameter I/O.

use thiserror::Error;

/// Result type for parameter I/O operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading, writing, or estimating parameters.
#[derive(Debug, Error)]
pub enum DataError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A field failed to parse
    #[error("parse error in {file}: {message}")]
    Parse {
        /// File being read
        file: String,
        /// What went wrong
        message: String,
    },

    /// A file has the wrong number of rows or columns
    #[error("shape error in {file}: {message}")]
    Shape {
        /// File being read
        file: String,
        /// What went wrong
        message: String,
    },

    /// Asset labels disagree across parameter files
    #[error("label mismatch between {left} and {right}")]
    LabelMismatch {
        /// First file
        left: String,
        /// Second file
        right: String,
    },

    /// A price in the history is zero or negative
    #[error("non-positive price {value} at row {row}, column {column}")]
    NonPositivePrice {
        /// Row index
        row: usize,
        /// Column index
        column: usize,
        /// Offending value
        value: f64,
    },

    /// Not enough history to estimate parameters
    #[error("insufficient history: need at least {required} rows, got {actual}")]
    InsufficientHistory {
        /// Required number of rows
        required: usize,
        /// Actual number of rows
        actual: usize,
    },

    /// An asset's return series has zero variance
    #[error("zero return variance for asset {label}; correlation is undefined")]
    ZeroVariance {
        /// Asset label
        label: String,
    },

    /// Estimated or loaded parameters failed validation
    #[error("parameter validation error: {0}")]
    Parameter(#[from] frontier::ParameterError),
}
