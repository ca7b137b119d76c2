//! Application state shared by all handlers.
//!
//! Everything here is built once at startup and only read afterwards; requests share no
//! mutable state apart from the upload name sequence.

use crate::services::email::MailDispatcher;
use crate::services::upload_store::UploadStore;

pub struct AppState {
    pub uploads: UploadStore,
    pub mailer: MailDispatcher,
}

impl AppState {
    pub fn new(uploads: UploadStore, mailer: MailDispatcher) -> Self {
        Self { uploads, mailer }
    }
}
