//! Error types module
//!
//! This module provides the error taxonomy used by the upload pipeline. Each failing
//! step has its own error type (`ValidationError`, `DeliveryError`, `CleanupError`);
//! the ones that reach the HTTP boundary are unified under `AppError`, which describes
//! how it should be presented through `ErrorMetadata`.

use std::io;
use std::path::PathBuf;

/// Boxed error produced by a mail transport implementation.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for client-caused limits such as oversized bodies
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DELIVERY_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether the internal message must stay out of client responses
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// The submitted form cannot be processed. Nothing has been written or sent.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("no file provided in field '{0}'")]
    MissingFile(&'static str),

    #[error("no recipient address provided in field '{0}'")]
    MissingRecipient(&'static str),

    #[error("recipient address '{address}' is invalid: {reason}")]
    InvalidRecipient { address: String, reason: String },

    #[error("more than one file provided in field '{0}'")]
    MultipleFiles(&'static str),

    #[error("malformed multipart body: {0}")]
    Malformed(String),

    #[error("request body exceeds the upload limit: {0}")]
    TooLarge(String),
}

/// The mail could not be composed or handed to the transport.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("failed to read attachment {path}: {source}")]
    Attachment {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to compose message: {0}")]
    Compose(String),

    #[error("mail transport failed: {0}")]
    Transport(#[source] TransportError),
}

/// Removing a temporary upload failed. Only ever logged.
#[derive(Debug, thiserror::Error)]
#[error("failed to delete temporary file {path}: {source}")]
pub struct CleanupError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

const REQUIRED_FIELDS_MESSAGE: &str = "Both an email address and an image file are required.";
const SERVER_LOGS_MESSAGE: &str =
    "An error occurred while sending the email. Please check the server logs.";
const INTERNAL_MESSAGE: &str = "An internal error occurred. Please check the server logs.";

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::Validation(ValidationError::TooLarge(_)) => 413,
            AppError::Validation(_) => 400,
            AppError::Delivery(_) | AppError::Storage { .. } | AppError::Internal(_) => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(ValidationError::TooLarge(_)) => "PAYLOAD_TOO_LARGE",
            AppError::Validation(_) => "INVALID_INPUT",
            AppError::Delivery(_) => "DELIVERY_ERROR",
            AppError::Storage { .. } => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation(err) => match err {
                ValidationError::MissingFile(_) | ValidationError::MissingRecipient(_) => {
                    REQUIRED_FIELDS_MESSAGE.to_string()
                }
                ValidationError::InvalidRecipient { address, .. } => {
                    format!("'{}' is not a valid email address.", address)
                }
                ValidationError::MultipleFiles(_) => {
                    "Only one image file can be sent at a time.".to_string()
                }
                ValidationError::Malformed(_) => "The upload could not be read.".to_string(),
                ValidationError::TooLarge(_) => "The uploaded file is too large.".to_string(),
            },
            AppError::Delivery(_) => SERVER_LOGS_MESSAGE.to_string(),
            AppError::Storage { .. } | AppError::Internal(_) => INTERNAL_MESSAGE.to_string(),
        }
    }

    fn is_sensitive(&self) -> bool {
        !matches!(self, AppError::Validation(_))
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::Validation(ValidationError::TooLarge(_)) => LogLevel::Warn,
            AppError::Validation(_) => LogLevel::Debug,
            AppError::Delivery(_) | AppError::Storage { .. } | AppError::Internal(_) => {
                LogLevel::Error
            }
        }
    }
}
