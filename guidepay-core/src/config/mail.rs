//! Mail transport and message configuration.

use crate::notifier::{Attachment, Mailbox};
use url::Url;

/// Mail configuration: how to send, and what to send.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub transport: MailTransport,
    /// Sender shown to the buyer.
    pub from: Mailbox,
    /// Subject line. `{name}` is replaced with the buyer name.
    pub subject: String,
    /// Plain-text body. `{name}` is replaced with the buyer name.
    pub body: String,
    /// The purchased asset, attached to every confirmation.
    pub attachment: Option<Attachment>,
}

/// Which mail transport delivers confirmations.
#[derive(Debug, Clone)]
pub enum MailTransport {
    /// Authenticated SMTP submission with STARTTLS.
    Smtp(SmtpConfig),
    /// MailerSend transactional email HTTP API.
    MailerSendApi(MailerSendConfig),
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone)]
pub struct MailerSendConfig {
    pub api_key: String,
    pub api_base: Url,
}

impl std::fmt::Debug for MailerSendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailerSendConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base.as_str())
            .finish()
    }
}
