//! Services used by the request handlers.

pub mod email;
pub mod upload_store;
