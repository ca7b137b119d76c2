//! Service initialization

use crate::services::email::MailDispatcher;
use crate::services::upload_store::UploadStore;
use crate::state::AppState;
use anyhow::{Context, Result};
use mailpic_core::Config;
use std::sync::Arc;

/// Create the upload directory and the SMTP-backed mail dispatcher.
pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let uploads = UploadStore::new(config.upload_dir());
    uploads.ensure_dir().await.with_context(|| {
        format!(
            "Failed to create upload directory {}",
            uploads.dir().display()
        )
    })?;
    tracing::info!(upload_dir = %uploads.dir().display(), "Upload directory ready");

    let mailer = MailDispatcher::from_config(&config.mail)
        .context("Failed to initialize mail transport")?;

    Ok(Arc::new(AppState::new(uploads, mailer)))
}
