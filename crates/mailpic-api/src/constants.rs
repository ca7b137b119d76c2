//! Form field names and route paths shared by handlers, templates and tests.

/// Multipart field carrying the image file
pub const IMAGE_FIELD: &str = "image";

/// Multipart field carrying the recipient address
pub const EMAIL_FIELD: &str = "email";

pub const FORM_PATH: &str = "/";
pub const UPLOAD_PATH: &str = "/upload";
pub const HEALTH_PATH: &str = "/health";
