//! Test helpers: build AppState and router for integration tests.
//!
//! Run with `cargo test -p mailpic-api`. Every test app gets its own temporary upload
//! directory and a fake mail transport; nothing touches the network.

#![allow(dead_code)]

pub mod fixtures;
pub mod transport;

use axum_test::TestServer;
use lettre::message::Mailbox;
use mailpic_api::setup::routes;
use mailpic_api::{AppState, MailDispatcher, UploadStore};
use mailpic_core::Config;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use transport::FakeTransport;

/// Test application: server, fake transport, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub transport: Arc<FakeTransport>,
    pub upload_dir: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Names of the files currently in the upload directory.
    pub fn stored_files(&self) -> Vec<String> {
        list_files(&self.upload_dir)
    }
}

pub fn list_files(dir: &Path) -> Vec<String> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}

pub fn create_test_config(upload_dir: &Path, extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("EMAIL_USER".to_string(), "sender@example.com".to_string()),
        ("EMAIL_PASS".to_string(), "app-password".to_string()),
        (
            "UPLOAD_DIR".to_string(),
            upload_dir.to_string_lossy().into_owned(),
        ),
    ]);
    for (key, value) in extra {
        vars.insert(key.to_string(), value.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).expect("valid test config")
}

/// Setup test app whose transport accepts every message.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(None, &[])
}

/// Setup test app whose transport rejects every message with `failure`.
pub fn setup_failing_test_app(failure: &str) -> TestApp {
    setup_test_app_with(Some(failure), &[])
}

pub fn setup_test_app_with(failure: Option<&str>, extra_env: &[(&str, &str)]) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    // Not created up front: the first upload creates it.
    let upload_dir = temp_dir.path().join("uploads");
    let transport = Arc::new(FakeTransport::new(upload_dir.clone(), failure));
    build_test_app(temp_dir, upload_dir, transport, extra_env)
}

/// Setup test app whose transport deletes the stored upload before accepting the message.
pub fn setup_test_app_removing_uploads() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let upload_dir = temp_dir.path().join("uploads");
    let transport = Arc::new(FakeTransport::removing_uploads(upload_dir.clone()));
    build_test_app(temp_dir, upload_dir, transport, &[])
}

/// Setup test app whose upload directory can never be created: its parent is a regular file.
pub fn setup_test_app_with_blocked_upload_dir() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let blocker = temp_dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"").expect("Failed to create blocker file");
    let upload_dir = blocker.join("uploads");
    let transport = Arc::new(FakeTransport::new(upload_dir.clone(), None));
    build_test_app(temp_dir, upload_dir, transport, &[])
}

fn build_test_app(
    temp_dir: TempDir,
    upload_dir: PathBuf,
    transport: Arc<FakeTransport>,
    extra_env: &[(&str, &str)],
) -> TestApp {
    let config = create_test_config(&upload_dir, extra_env);

    let from: Mailbox = "Project Mentor <sender@example.com>"
        .parse()
        .expect("valid sender");
    let mailer = MailDispatcher::new(transport.clone(), from);
    let uploads = UploadStore::new(config.upload_dir());

    let state = Arc::new(AppState::new(uploads, mailer));
    let router = routes::setup_routes(&config, state);
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        transport,
        upload_dir,
        _temp_dir: temp_dir,
    }
}
