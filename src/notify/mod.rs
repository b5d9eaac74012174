// src/notify/mod.rs

//! Outbound mail notification.
//!
//! One plain-text message per run that found new lectures, sent to all
//! recipients over an authenticated STARTTLS submission.

use lettre::message::{Mailbox, Message, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use thiserror::Error;

use crate::models::{MailConfig, MailCredentials};

/// Mail failure, split so connection, addressing, and delivery problems
/// log distinctly. The orchestrator collapses all of them to "not sent".
#[derive(Error, Debug)]
pub enum MailError {
    /// A sender or recipient address failed to parse
    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The message itself could not be built
    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    /// SMTP connection, authentication, or delivery failed
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Authenticated SMTP sender addressing a fixed recipient list.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    recipients: Vec<Mailbox>,
    subject_prefix: String,
}

impl Mailer {
    /// Build a mailer from config, credentials, and recipient list.
    pub fn new(
        config: &MailConfig,
        credentials: &MailCredentials,
        recipients: &[String],
    ) -> Result<Self, MailError> {
        let creds = Credentials::new(credentials.sender.clone(), credentials.secret.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        let from: Mailbox = credentials.sender.parse()?;
        let recipients = recipients
            .iter()
            .map(|r| r.parse())
            .collect::<Result<Vec<Mailbox>, _>>()?;

        Ok(Self {
            transport,
            from,
            recipients,
            subject_prefix: config.subject_prefix.clone(),
        })
    }

    /// Send one plain-text message to all recipients.
    pub async fn send(&self, subject: &str, body: &str) -> Result<(), MailError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(format!("{} {}", self.subject_prefix, subject))
            .header(header::ContentType::TEXT_PLAIN);

        for recipient in &self.recipients {
            builder = builder.to(recipient.clone());
        }

        let message = builder.body(body.to_string())?;
        self.transport.send(message).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> MailCredentials {
        MailCredentials {
            sender: "watcher@example.com".to_string(),
            secret: "secret".to_string(),
        }
    }

    #[test]
    fn test_mailer_builds_with_valid_addresses() {
        let mailer = Mailer::new(
            &MailConfig::default(),
            &credentials(),
            &["a@example.com".to_string(), "b@example.com".to_string()],
        );
        assert!(mailer.is_ok());
    }

    #[test]
    fn test_invalid_recipient_is_address_error() {
        let result = Mailer::new(
            &MailConfig::default(),
            &credentials(),
            &["not an address".to_string()],
        );
        assert!(matches!(result, Err(MailError::Address(_))));
    }

    #[test]
    fn test_invalid_sender_is_address_error() {
        let creds = MailCredentials {
            sender: "broken".to_string(),
            secret: "secret".to_string(),
        };
        let result = Mailer::new(&MailConfig::default(), &creds, &["a@example.com".to_string()]);
        assert!(matches!(result, Err(MailError::Address(_))));
    }
}
