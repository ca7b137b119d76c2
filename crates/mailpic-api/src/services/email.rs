//! Mail dispatcher for sending an uploaded image to its recipient via SMTP.

use askama::Template;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use mailpic_core::{DeliveryError, MailConfig, SmtpSecurity, TransportError, UploadedFile};
use std::sync::Arc;
use tracing::info;

use crate::templates::EmailBody;

pub const SUBJECT: &str = "Image Upload Project - Your file is attached!";

/// Outbound mail transport. Implemented for the lettre SMTP transport; tests inject fakes.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Hand one message to the transport. A single attempt, no retry.
    async fn deliver(&self, message: Message) -> Result<(), TransportError>;
}

#[async_trait]
impl MailTransport for AsyncSmtpTransport<Tokio1Executor> {
    async fn deliver(&self, message: Message) -> Result<(), TransportError> {
        self.send(message).await?;
        Ok(())
    }
}

/// One outgoing mail carrying one uploaded file.
#[derive(Debug)]
pub struct MailRequest<'a> {
    pub recipient: Address,
    pub subject: String,
    pub body: String,
    pub attachment: &'a UploadedFile,
}

impl<'a> MailRequest<'a> {
    /// Standard subject and body naming the attached file.
    pub fn for_upload(
        recipient: Address,
        attachment: &'a UploadedFile,
    ) -> Result<Self, DeliveryError> {
        let body = EmailBody {
            filename: &attachment.original_name,
        }
        .render()
        .map_err(|e| DeliveryError::Compose(format!("failed to render mail body: {}", e)))?;

        Ok(Self {
            recipient,
            subject: SUBJECT.to_string(),
            body,
            attachment,
        })
    }
}

/// Sends upload mails through a transport configured once at startup.
#[derive(Clone)]
pub struct MailDispatcher {
    transport: Arc<dyn MailTransport>,
    from: Mailbox,
}

impl MailDispatcher {
    pub fn new(transport: Arc<dyn MailTransport>, from: Mailbox) -> Self {
        Self { transport, from }
    }

    /// Build the SMTP transport from config. Nothing connects until the first send.
    pub fn from_config(config: &MailConfig) -> Result<Self, anyhow::Error> {
        let address: Address = config.user.parse().map_err(|e| {
            anyhow::anyhow!("EMAIL_USER '{}' is not a valid address: {}", config.user, e)
        })?;
        let from = Mailbox::new(Some(config.from_name.clone()), address);

        let host = config.smtp_host.as_str();
        let builder = match config.smtp_security {
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(host)?,
            SmtpSecurity::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?,
            SmtpSecurity::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host),
        };
        let mailer = builder
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ))
            .build();

        tracing::info!(
            host = %host,
            port = config.smtp_port,
            security = %config.smtp_security,
            from = %from,
            "Email service initialized (SMTP)"
        );

        Ok(Self::new(Arc::new(mailer), from))
    }

    /// Build the message, reading the attachment from disk.
    pub async fn compose(&self, request: &MailRequest<'_>) -> Result<Message, DeliveryError> {
        let file = request.attachment;
        let data = tokio::fs::read(&file.path)
            .await
            .map_err(|source| DeliveryError::Attachment {
                path: file.path.clone(),
                source,
            })?;

        let content_type = ContentType::parse(&file.content_type)
            .or_else(|_| ContentType::parse("application/octet-stream"))
            .map_err(|e| DeliveryError::Compose(format!("invalid content type: {}", e)))?;

        Message::builder()
            .from(self.from.clone())
            .to(Mailbox::new(None, request.recipient.clone()))
            .subject(request.subject.as_str())
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::html(request.body.clone()))
                    .singlepart(Attachment::new(file.original_name.clone()).body(data, content_type)),
            )
            .map_err(|e| DeliveryError::Compose(e.to_string()))
    }

    /// Compose and send. One attempt; the caller decides what a failure means.
    pub async fn send(&self, request: &MailRequest<'_>) -> Result<(), DeliveryError> {
        let message = self.compose(request).await?;
        self.transport
            .deliver(message)
            .await
            .map_err(DeliveryError::Transport)?;

        info!(
            recipient = %request.recipient,
            file = %request.attachment.stored_name,
            "Email sent"
        );
        Ok(())
    }
}
