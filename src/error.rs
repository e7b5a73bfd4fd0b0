//! Error handling for Companies House bulk data processing.
//!
//! Fatal conditions only. Fields that cannot be decoded (unknown codes,
//! blank or invalid dates) are represented as absent values and never
//! reach this type.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Snapshot store error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Input path does not exist: {path}")]
    InputNotFound { path: PathBuf },

    #[error("No files matching '{pattern}' found in directory: {path}")]
    NoMatchingFiles { path: PathBuf, pattern: String },

    #[error("Unknown transaction type '{code}' for company {company_number}")]
    UnknownTransactionType {
        code: String,
        company_number: String,
    },

    #[error("Invalid format in {path}: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("Snapshot store error: {message}")]
    Store { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl ProcessorError {
    /// Create a store error with context
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid format error for a file
    pub fn invalid_format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Whether the error was raised before any record was read
    pub fn is_input_resolution(&self) -> bool {
        matches!(
            self,
            Self::InputNotFound { .. } | Self::NoMatchingFiles { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ProcessorError>;
