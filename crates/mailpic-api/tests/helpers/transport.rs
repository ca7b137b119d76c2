//! Recording fake for the outbound mail transport.

use async_trait::async_trait;
use lettre::Message;
use mailpic_api::MailTransport;
use mailpic_core::TransportError;
use std::path::PathBuf;
use std::sync::Mutex;

/// One call to `deliver`, with what the upload directory held at that moment.
#[derive(Debug, Clone)]
pub struct DeliveryAttempt {
    pub raw: String,
    pub files_present: Vec<String>,
}

/// What `deliver` does after recording the attempt.
#[derive(Debug, Clone)]
enum Outcome {
    Accept,
    Reject(String),
    /// Empty the upload directory, then accept; cleanup then finds nothing to delete.
    AcceptAfterRemovingUploads,
}

pub struct FakeTransport {
    upload_dir: PathBuf,
    outcome: Outcome,
    attempts: Mutex<Vec<DeliveryAttempt>>,
}

impl FakeTransport {
    pub fn new(upload_dir: PathBuf, failure: Option<&str>) -> Self {
        let outcome = match failure {
            Some(reason) => Outcome::Reject(reason.to_string()),
            None => Outcome::Accept,
        };
        Self::with_outcome(upload_dir, outcome)
    }

    /// Accepts every message but deletes the stored uploads first.
    pub fn removing_uploads(upload_dir: PathBuf) -> Self {
        Self::with_outcome(upload_dir, Outcome::AcceptAfterRemovingUploads)
    }

    fn with_outcome(upload_dir: PathBuf, outcome: Outcome) -> Self {
        Self {
            upload_dir,
            outcome,
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn attempts(&self) -> Vec<DeliveryAttempt> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }
}

#[async_trait]
impl MailTransport for FakeTransport {
    async fn deliver(&self, message: Message) -> Result<(), TransportError> {
        let attempt = DeliveryAttempt {
            raw: String::from_utf8_lossy(&message.formatted()).into_owned(),
            files_present: super::list_files(&self.upload_dir),
        };
        self.attempts.lock().unwrap().push(attempt);

        match &self.outcome {
            Outcome::Accept => Ok(()),
            Outcome::Reject(reason) => Err(reason.clone().into()),
            Outcome::AcceptAfterRemovingUploads => {
                for name in super::list_files(&self.upload_dir) {
                    std::fs::remove_file(self.upload_dir.join(name))?;
                }
                Ok(())
            }
        }
    }
}
