//! Mailpic API Library
//!
//! This crate provides the HTTP handlers, the upload and mail services, and
//! application setup for the image-by-email service.

// Module declarations
pub mod constants;
mod handlers;
mod telemetry;
mod templates;
mod utils;

// Public modules
pub mod error;
pub mod services;
pub mod setup;
pub mod state;

// Re-exports
pub use error::HttpAppError;
pub use services::email::{MailDispatcher, MailRequest, MailTransport};
pub use services::upload_store::{TempUpload, UploadStore};
pub use state::AppState;
