//! Transient per-request data.
//!
//! Nothing here outlives the request that created it.

use bytes::Bytes;
use std::path::PathBuf;

/// A file received in a multipart form, still in memory.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    /// Sanitized client-supplied filename
    pub original_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl IncomingFile {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// A file persisted to the upload directory for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Full path of the temporary copy
    pub path: PathBuf,
    pub original_name: String,
    /// Generated unique name, `<unix millis>-<sequence>-<original name>`
    pub stored_name: String,
    pub size: u64,
    pub content_type: String,
}
