//! Purchase confirmation email.
//!
//! The verification pipeline talks to a single [`Notifier`] capability.
//! Which transport sits behind it (SMTP relay or a provider HTTP API) is
//! decided by configuration in [`build_notifier`].

mod mailersend;
mod smtp;
mod template;

pub use mailersend::MailerSendNotifier;
pub use smtp::SmtpNotifier;
pub use template::MessageTemplate;

use crate::config::{MailConfig, MailTransport};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// An email address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    pub name: Option<String>,
    pub email: String,
}

impl Mailbox {
    pub fn new(name: Option<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.filter(|n| !n.trim().is_empty()),
            email: email.into(),
        }
    }
}

/// A static file attached to every confirmation. The file is read from disk
/// each time a message is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name shown to the recipient.
    pub filename: String,
    /// Location on local disk.
    pub path: PathBuf,
    /// MIME type, e.g. `application/pdf`.
    pub content_type: String,
}

impl Attachment {
    async fn load(&self) -> Result<Vec<u8>, NotificationError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| NotificationError::Attachment {
                path: self.path.clone(),
                source,
            })
    }
}

/// A single confirmation email, built per verified purchase and dropped
/// once sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub from: Mailbox,
    pub to: Mailbox,
    pub subject: String,
    pub text: String,
    pub attachment: Option<Attachment>,
}

/// Errors that can occur while delivering a confirmation.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The attachment could not be read
    #[error("failed to read attachment {path:?}: {source}")]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The message could not be assembled (bad address, bad MIME type)
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// SMTP transport error
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The mail API answered with a non-success status
    #[error("mail API error with status {status}: {body}")]
    Api { status: u16, body: String },

    /// The endpoint URL could not be built
    #[error("invalid mail API url: {0}")]
    Url(#[from] url::ParseError),
}

/// Capability to deliver one confirmation email.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &NotificationMessage) -> Result<(), NotificationError>;
}

/// Construct the notifier selected by `[mail] transport`.
pub fn build_notifier(config: &MailConfig) -> Result<Arc<dyn Notifier>, NotificationError> {
    let notifier: Arc<dyn Notifier> = match &config.transport {
        MailTransport::Smtp(smtp) => Arc::new(SmtpNotifier::new(smtp)?),
        MailTransport::MailerSendApi(api) => Arc::new(MailerSendNotifier::new(api)),
    };
    Ok(notifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_display_name_dropped() {
        assert_eq!(Mailbox::new(Some("  ".into()), "a@b.c").name, None);
        assert_eq!(
            Mailbox::new(Some("Asha".into()), "a@b.c").name.as_deref(),
            Some("Asha")
        );
    }

    #[tokio::test]
    async fn test_missing_attachment_is_error() {
        let attachment = Attachment {
            filename: "guide.pdf".to_string(),
            path: PathBuf::from("/definitely/not/here/guide.pdf"),
            content_type: "application/pdf".to_string(),
        };
        let err = attachment.load().await.unwrap_err();
        assert!(matches!(err, NotificationError::Attachment { .. }));
    }
}
