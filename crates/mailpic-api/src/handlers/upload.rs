use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Multipart, State},
    response::Html,
};
use mailpic_core::AppError;

use crate::error::HttpAppError;
use crate::services::email::MailRequest;
use crate::state::AppState;
use crate::templates::UploadSuccessPage;
use crate::utils::upload::extract_upload_form;

/// Upload image handler
///
/// Validates the form, stores the image, mails it to the recipient and deletes the
/// stored copy, in that order. A rejected form never touches the disk. Once the file
/// is stored it is deleted exactly once whatever the outcome of the send.
///
/// # Returns
/// HTML confirmation echoing the recipient (HTTP 200)
///
/// # Errors
/// - `ValidationError` - missing file or address, invalid address (HTTP 400/413)
/// - `DeliveryError` - the mail could not be sent (HTTP 500)
/// - `AppError::Storage` - the file could not be written (HTTP 500)
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_image"))]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Html<String>, HttpAppError> {
    let form = extract_upload_form(multipart).await?;

    let upload = state.uploads.store(form.file).await?;

    tracing::info!(
        file = %upload.file().stored_name,
        recipient = %form.recipient,
        "Processing upload"
    );

    let sent = match MailRequest::for_upload(form.recipient.clone(), upload.file()) {
        Ok(request) => state.mailer.send(&request).await,
        Err(e) => Err(e),
    };

    upload.discard().await;

    sent?;

    let page = UploadSuccessPage {
        recipient: form.recipient.as_ref(),
    }
    .render()
    .map_err(|e| AppError::Internal(format!("failed to render success page: {}", e)))?;

    Ok(Html(page))
}
