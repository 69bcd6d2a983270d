//! Error types for the callrec-renamer library.
//!
//! This module provides custom error types using `thiserror` for better error handling
//! and more specific error messages throughout the application.

use thiserror::Error;

/// Errors that can occur in the callrec-renamer application.
#[derive(Error, Debug)]
pub enum RenamerError {
    /// Direction code in the filename is not one of the known values
    #[error("unrecognized direction code '{code}' in '{filename}'")]
    BadDirectionCode {
        /// The offending code character
        code: char,
        /// Base name of the file being parsed
        filename: String,
    },

    /// Timestamp field could not be decoded into a calendar datetime
    #[error("invalid timestamp '{raw}' in '{filename}': {reason}")]
    BadTimestamp {
        /// The raw timestamp field
        raw: String,
        /// Base name of the file being parsed
        filename: String,
        /// Why decoding failed
        reason: String,
    },

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Contact store could not be read
    #[error("Contact store parse error: {0}")]
    ContactStoreParse(#[from] toml::de::Error),

    /// Contact store could not be written
    #[error("Contact store write error: {0}")]
    ContactStoreWrite(#[from] toml::ser::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid user input (paths, region codes)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// General error with context
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Result with RenamerError
pub type Result<T> = std::result::Result<T, RenamerError>;

impl From<anyhow::Error> for RenamerError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
