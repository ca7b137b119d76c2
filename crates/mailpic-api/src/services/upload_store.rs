//! Temporary storage for uploaded images.
//!
//! Each upload is written under a unique name and handed back as a [`TempUpload`],
//! which removes the file exactly once: explicitly through [`TempUpload::discard`],
//! or on drop if the request ends on any other path.

use chrono::Utc;
use mailpic_core::{AppError, CleanupError, IncomingFile, UploadedFile};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Upload directory plus the sequence used to keep generated names unique.
#[derive(Debug)]
pub struct UploadStore {
    dir: PathBuf,
    sequence: AtomicU64,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist. Safe to call concurrently.
    pub async fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir).await
    }

    /// `<unix millis>-<sequence>-<original name>`
    fn unique_name(&self, original_name: &str) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}-{}", Utc::now().timestamp_millis(), seq, original_name)
    }

    /// Persist an incoming file. The file is created with create-new semantics, so an
    /// existing file is never overwritten.
    pub async fn store(&self, incoming: IncomingFile) -> Result<TempUpload, AppError> {
        self.ensure_dir().await.map_err(|source| AppError::Storage {
            path: self.dir.clone(),
            source,
        })?;

        let stored_name = self.unique_name(&incoming.original_name);
        let path = self.dir.join(&stored_name);

        if let Err(source) = write_new_file(&path, &incoming.data).await {
            // Don't leave a partial file behind; it never reaches a TempUpload.
            if source.kind() != io::ErrorKind::AlreadyExists {
                remove_partial(&path).await;
            }
            return Err(AppError::Storage { path, source });
        }

        tracing::debug!(
            path = %path.display(),
            size = incoming.size(),
            content_type = %incoming.content_type,
            "Stored temporary upload"
        );

        Ok(TempUpload {
            file: UploadedFile {
                path,
                size: incoming.size(),
                original_name: incoming.original_name,
                stored_name,
                content_type: incoming.content_type,
            },
            pending: true,
        })
    }
}

async fn write_new_file(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(data).await?;
    file.flush().await?;
    Ok(())
}

/// Remove whatever a failed write left at `path`. A missing file means nothing was
/// created and is not logged.
async fn remove_partial(path: &Path) {
    match fs::remove_file(path).await {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        result => {
            let result = result.map_err(|source| CleanupError {
                path: path.to_path_buf(),
                source,
            });
            log_cleanup(result, path);
        }
    }
}

/// An uploaded file that is deleted when the request is done with it.
#[derive(Debug)]
pub struct TempUpload {
    file: UploadedFile,
    pending: bool,
}

impl TempUpload {
    pub fn file(&self) -> &UploadedFile {
        &self.file
    }

    /// Delete the file now. Failures are logged and never returned.
    pub async fn discard(mut self) {
        self.pending = false;
        let result = fs::remove_file(&self.file.path)
            .await
            .map_err(|source| CleanupError {
                path: self.file.path.clone(),
                source,
            });
        log_cleanup(result, &self.file.path);
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if !self.pending {
            return;
        }
        self.pending = false;
        // Only reached when the request was cancelled or panicked before `discard`.
        // One blocking unlink on the worker thread is accepted there.
        let result = std::fs::remove_file(&self.file.path).map_err(|source| CleanupError {
            path: self.file.path.clone(),
            source,
        });
        log_cleanup(result, &self.file.path);
    }
}

fn log_cleanup(result: Result<(), CleanupError>, path: &Path) {
    match result {
        Ok(()) => tracing::info!(path = %path.display(), "Temporary file deleted"),
        Err(e) => tracing::error!(error = %e, "Failed to delete temporary file"),
    }
}
