//! Test fixtures: minimal PNG blob and upload forms.

use axum_test::multipart::{MultipartForm, Part};
use mailpic_api::constants::{EMAIL_FIELD, IMAGE_FIELD};

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// Image part named `filename` carrying the minimal PNG.
pub fn png_part(filename: &str) -> Part {
    Part::bytes(create_minimal_png())
        .file_name(filename)
        .mime_type("image/png")
}

/// Form with a PNG under the image field and the given recipient.
pub fn upload_form(filename: &str, email: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text(EMAIL_FIELD, email)
        .add_part(IMAGE_FIELD, png_part(filename))
}

/// Form with only the recipient.
pub fn email_only_form(email: &str) -> MultipartForm {
    MultipartForm::new().add_text(EMAIL_FIELD, email)
}

/// Form with only the image.
pub fn image_only_form(filename: &str) -> MultipartForm {
    MultipartForm::new().add_part(IMAGE_FIELD, png_part(filename))
}
