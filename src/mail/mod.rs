//! Outbound email for doorkeep.
//!
//! The SMTP transport is a thin, replaceable shim behind the [`Mailer`]
//! trait; tests substitute a recording implementation.

use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::PoolConfig;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;

use crate::config::MailConfig;

/// Subject line for password-reset mail.
pub const RESET_EMAIL_SUBJECT: &str = "Doorkeep - Password Reset Link";

/// Mail-related errors.
#[derive(Error, Debug)]
pub enum MailError {
    /// A sender or recipient address failed to parse.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The message could not be built.
    #[error("failed to build message: {0}")]
    Build(String),

    /// The transport failed to deliver the message.
    #[error("failed to send email: {0}")]
    Send(String),
}

/// Outbound mail transport.
pub trait Mailer: Send + Sync {
    /// Send a plain-text email.
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// SMTP-backed mailer.
pub struct SmtpMailer {
    config: MailConfig,
}

impl SmtpMailer {
    /// Create a mailer from SMTP configuration.
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let email = Message::builder()
            .from(
                self.config
                    .from_address
                    .parse()
                    .map_err(|e| MailError::InvalidAddress(format!("from address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| MailError::InvalidAddress(format!("to address: {e}")))?)
            .subject(subject)
            .header(lettre::message::header::ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| MailError::Build(e.to_string()))?;

        let mailer = SmtpTransport::relay(&self.config.smtp_host)
            .map_err(|e| MailError::Send(e.to_string()))?
            .credentials(Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            ))
            .port(self.config.smtp_port)
            .pool_config(PoolConfig::new().max_size(1))
            .timeout(Some(std::time::Duration::from_secs(10)))
            .build();

        mailer.send(&email).map_err(|e| MailError::Send(e.to_string()))?;

        tracing::info!(to = %to, "password email dispatched");
        Ok(())
    }
}

/// Build the plain-text body for a password-reset email.
pub fn reset_email_body(name: &str, reset_link: &str) -> String {
    format!(
        "Hello {name},\n\
        \n\
        A password reset was requested for your account.\n\
        \n\
        To choose a new password, open the following link:\n\
        \n\
        {reset_link}\n\
        \n\
        This link will expire in 15 minutes.\n\
        \n\
        If you did not request this reset, please ignore this email.\n"
    )
}
