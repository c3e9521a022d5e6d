//! Error types for import identification.

use thiserror::Error;

/// Errors raised while identifying an import target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The uploaded file has no content.
    #[error("the file is empty: {name}")]
    EmptyFile { name: String },

    /// The file name has no `.format` suffix.
    #[error("the file format is invalid: {name}")]
    InvalidFormat { name: String },

    /// The file name does not split into `app+cluster+namespace`.
    #[error("file name [{name}] not valid: {reason}")]
    InvalidFileName { name: String, reason: String },

    /// The last part is not exactly `namespace.format`.
    #[error("{name} namespace and format is invalid")]
    InvalidNamespace { name: String },

    /// The format suffix is not one cfgtext knows.
    #[error("{name} format is invalid: {format}")]
    UnsupportedFormat { name: String, format: String },
}

/// Convenience type alias for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;
