//! MailerSend HTTP API transport.

use super::{Mailbox, NotificationError, NotificationMessage, Notifier};
use crate::config::MailerSendConfig;
use async_trait::async_trait;
use serde::Serialize;
use url::Url;

/// Sends mail through `POST /v1/email` with a bearer API key.
pub struct MailerSendNotifier {
    api_key: String,
    api_base: Url,
    http_client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct Recipient<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl<'a> From<&'a Mailbox> for Recipient<'a> {
    fn from(mailbox: &'a Mailbox) -> Self {
        Self {
            email: &mailbox.email,
            name: mailbox.name.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
struct EmailAttachment<'a> {
    filename: &'a str,
    content: String,
    disposition: &'static str,
}

#[derive(Debug, Serialize)]
struct EmailRequest<'a> {
    from: Recipient<'a>,
    to: [Recipient<'a>; 1],
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<EmailAttachment<'a>>,
}

impl MailerSendNotifier {
    pub const DEFAULT_API_BASE: &str = "https://api.mailersend.com/";

    pub fn new(config: &MailerSendConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            api_base: config.api_base.clone(),
            http_client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }
}

#[async_trait]
impl Notifier for MailerSendNotifier {
    #[tracing::instrument(skip_all, err, name = "MailerSend:Send", fields(to = %message.to.email))]
    async fn send(&self, message: &NotificationMessage) -> Result<(), NotificationError> {
        let mut attachments = Vec::new();
        if let Some(attachment) = &message.attachment {
            let content = attachment.load().await?;
            attachments.push(EmailAttachment {
                filename: &attachment.filename,
                content: fast32::base64::RFC4648.encode(&content),
                disposition: "attachment",
            });
        }

        let request = EmailRequest {
            from: (&message.from).into(),
            to: [(&message.to).into()],
            subject: &message.subject,
            text: &message.text,
            attachments,
        };

        let response = self
            .http_client
            .post(self.api_base.join("v1/email")?)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(status = %status, "Mail API accepted message");
        Ok(())
    }
}
