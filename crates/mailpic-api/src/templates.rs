//! Server-rendered HTML. Values are HTML-escaped by askama.

use askama::Template;

/// Body of the outgoing mail.
#[derive(Template)]
#[template(path = "email_body.html")]
pub struct EmailBody<'a> {
    pub filename: &'a str,
}

/// Page returned after a successful send.
#[derive(Template)]
#[template(path = "upload_success.html")]
pub struct UploadSuccessPage<'a> {
    pub recipient: &'a str,
}
