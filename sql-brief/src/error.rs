//! Error types for the sql-brief library.
//!
//! All fallible operations return [`BriefError`]. Only structural contract
//! violations surface from the profiling core; sparse or degenerate data is
//! absorbed into a valid profile instead of raising.

use thiserror::Error;

/// The main error type for the sql-brief library.
#[derive(Error, Debug)]
pub enum BriefError {
    /// The table-definition text does not line up with the table's columns.
    ///
    /// Raised by the schema annotator when the number of lines between the
    /// header and footer differs from the number of columns.
    #[error(
        "Schema text for table '{table}' has {lines} column lines but the table has {columns} columns"
    )]
    InputShape {
        /// Name of the table being annotated
        table: String,
        /// Number of column definition lines found in the text
        lines: usize,
        /// Number of columns in the table
        columns: usize,
    },

    /// Two columns of one table share a name.
    #[error("Duplicate column '{column}' in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    /// A requested column does not exist.
    #[error("Column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    /// Error from DataFusion operations.
    #[error("DataFusion error: {0}")]
    DataFusion(#[from] datafusion::error::DataFusionError),

    /// Error from Arrow operations.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error related to configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// No backend is registered for the requested model name.
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// A model backend failed to load or to answer.
    #[error("Inference failed for '{model}': {message}")]
    Inference { model: String, message: String },
}

/// A type alias for `Result<T, BriefError>`.
pub type BriefResult<T> = std::result::Result<T, BriefError>;

impl BriefError {
    /// Creates a configuration error with the given message.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates an inference error for the given model.
    pub fn inference(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Inference {
            model: model.into(),
            message: message.into(),
        }
    }

    /// Returns true when the error signals a caller-side contract violation
    /// rather than an environmental failure.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::InputShape { .. } | Self::DuplicateColumn { .. } | Self::ColumnNotFound { .. }
        )
    }
}

/// Converts serde_json errors to BriefError.
impl From<serde_json::Error> for BriefError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
