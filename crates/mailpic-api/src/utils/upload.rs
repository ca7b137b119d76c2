//! Multipart parsing for the upload form

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use lettre::Address;
use mailpic_core::{IncomingFile, ValidationError};

use crate::constants::{EMAIL_FIELD, IMAGE_FIELD};

/// A fully validated upload form: one file and one parsed recipient.
#[derive(Debug)]
pub struct UploadForm {
    pub recipient: Address,
    pub file: IncomingFile,
}

fn multipart_error(err: MultipartError) -> ValidationError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ValidationError::TooLarge(err.body_text())
    } else {
        ValidationError::Malformed(err.body_text())
    }
}

/// Read the whole form into memory and validate it.
///
/// Only one file part named `image` is accepted; a second one is rejected. An `image`
/// part without a filename is a plain text field, not a file, and is skipped. A file part
/// with an empty filename and no data (what browsers send when nothing was chosen) counts
/// as missing. Unknown fields are ignored. Nothing is written to disk here.
pub async fn extract_upload_form(mut multipart: Multipart) -> Result<UploadForm, ValidationError> {
    let mut file: Option<IncomingFile> = None;
    let mut email: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == IMAGE_FIELD {
            let Some(filename) = field.file_name().map(|s: &str| s.to_string()) else {
                continue;
            };
            let content_type = field.content_type().map(|s: &str| s.to_string());
            let data = field.bytes().await.map_err(multipart_error)?;

            if data.is_empty() && filename.is_empty() {
                continue;
            }
            if file.is_some() {
                return Err(ValidationError::MultipleFiles(IMAGE_FIELD));
            }

            file = Some(IncomingFile {
                original_name: sanitize_filename(&filename),
                content_type: content_type
                    .unwrap_or_else(|| "application/octet-stream".to_string()),
                data,
            });
        } else if field_name == EMAIL_FIELD {
            let value = field.text().await.map_err(multipart_error)?;
            email = Some(value);
        }
    }

    let email = email
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ValidationError::MissingRecipient(EMAIL_FIELD))?;
    let file = file.ok_or(ValidationError::MissingFile(IMAGE_FIELD))?;

    let recipient = email
        .parse::<Address>()
        .map_err(|e| ValidationError::InvalidRecipient {
            address: email.clone(),
            reason: e.to_string(),
        })?;

    Ok(UploadForm { recipient, file })
}

/// Reduce a client-supplied filename to a safe final path component.
/// Falls back to `file` when nothing usable is left.
pub fn sanitize_filename(filename: &str) -> String {
    const MAX_FILENAME_LENGTH: usize = 200;

    // Clients may send full paths with either separator.
    let filename_only = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();

    if filename_only.contains("..") {
        return "file".to_string();
    }

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches(|c| c == '.' || c == '_').is_empty() {
        return "file".to_string();
    }

    sanitized
}
