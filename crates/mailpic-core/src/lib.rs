//! Mailpic Core Library
//!
//! This crate provides configuration, error types and the transient data model
//! shared by the mailpic components.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, MailConfig, SmtpSecurity, UploadConfig};
pub use error::{
    AppError, CleanupError, DeliveryError, ErrorMetadata, LogLevel, TransportError,
    ValidationError,
};
pub use models::{IncomingFile, UploadedFile};
