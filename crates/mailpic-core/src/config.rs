//! Configuration module
//!
//! This module provides the settings for the HTTP listener, the outbound SMTP relay
//! and the temporary upload directory. Everything is read once at startup and held
//! read-only for the lifetime of the process.

use std::env;
use std::fmt;
use std::path::PathBuf;

// Common constants
const SERVER_PORT: u16 = 3000;
const SMTP_HOST: &str = "smtp.gmail.com";
const MAIL_FROM_NAME: &str = "Project Mentor";
const UPLOAD_DIR: &str = "uploads";
const MAX_UPLOAD_SIZE_MB: usize = 25;

/// How the SMTP connection is secured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// Implicit TLS from the first byte (SMTPS)
    Tls,
    /// Plain connection upgraded with STARTTLS
    StartTls,
    /// Unencrypted; only for local relays and test sinks
    None,
}

impl SmtpSecurity {
    pub fn default_port(self) -> u16 {
        match self {
            SmtpSecurity::Tls => 465,
            SmtpSecurity::StartTls => 587,
            SmtpSecurity::None => 25,
        }
    }

    fn parse(value: &str) -> Result<Self, anyhow::Error> {
        match value.trim().to_lowercase().as_str() {
            "tls" | "ssl" | "smtps" => Ok(SmtpSecurity::Tls),
            "starttls" => Ok(SmtpSecurity::StartTls),
            "none" | "plain" => Ok(SmtpSecurity::None),
            other => Err(anyhow::anyhow!(
                "SMTP_SECURITY must be one of 'tls', 'starttls' or 'none' (got '{}')",
                other
            )),
        }
    }
}

impl fmt::Display for SmtpSecurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SmtpSecurity::Tls => "tls",
            SmtpSecurity::StartTls => "starttls",
            SmtpSecurity::None => "none",
        };
        f.write_str(name)
    }
}

/// Outbound mail account and relay settings.
#[derive(Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_security: SmtpSecurity,
    /// Sending account; doubles as the SMTP username
    pub user: String,
    pub password: String,
    /// Display name used in the `From` header
    pub from_name: String,
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_security", &self.smtp_security)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("from_name", &self.from_name)
            .finish()
    }
}

/// Temporary upload storage settings.
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub max_size_bytes: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub mail: MailConfig,
    pub upload: UploadConfig,
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let server_port = match var("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let smtp_security = match var("SMTP_SECURITY") {
            Some(value) => SmtpSecurity::parse(&value)?,
            None => SmtpSecurity::StartTls,
        };

        let smtp_port = match var("SMTP_PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .ok()
                .filter(|&p| p > 0)
                .ok_or_else(|| anyhow::anyhow!("SMTP_PORT must be a valid port number"))?,
            None => smtp_security.default_port(),
        };

        let max_upload_size_mb = match var("MAX_UPLOAD_SIZE_MB") {
            Some(size) => size
                .trim()
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be a valid number"))?,
            None => MAX_UPLOAD_SIZE_MB,
        };

        let mail = MailConfig {
            smtp_host: var("SMTP_HOST").unwrap_or_else(|| SMTP_HOST.to_string()),
            smtp_port,
            smtp_security,
            user: var("EMAIL_USER")
                .map(|s| s.trim().to_string())
                .ok_or_else(|| anyhow::anyhow!("EMAIL_USER must be set to the sending account"))?,
            password: var("EMAIL_PASS")
                .ok_or_else(|| anyhow::anyhow!("EMAIL_PASS must be set for SMTP authentication"))?,
            from_name: var("MAIL_FROM_NAME").unwrap_or_else(|| MAIL_FROM_NAME.to_string()),
        };

        let upload = UploadConfig {
            dir: PathBuf::from(var("UPLOAD_DIR").unwrap_or_else(|| UPLOAD_DIR.to_string())),
            max_size_bytes: max_upload_size_mb.saturating_mul(1024 * 1024),
        };

        let config = Config {
            server_port,
            mail,
            upload,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.mail.user.contains('@') {
            return Err(anyhow::anyhow!(
                "EMAIL_USER must be an email address (got '{}')",
                self.mail.user
            ));
        }

        if self.mail.smtp_host.trim().is_empty() {
            return Err(anyhow::anyhow!("SMTP_HOST cannot be empty"));
        }

        if self.upload.max_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than zero"));
        }

        if self.upload.dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("UPLOAD_DIR cannot be empty"));
        }

        Ok(())
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn upload_dir(&self) -> &std::path::Path {
        &self.upload.dir
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.upload.max_size_bytes
    }
}
