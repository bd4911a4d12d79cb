//! SMTP relay transport.

use super::{Mailbox, NotificationError, NotificationMessage, Notifier};
use crate::config::SmtpConfig;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment as MimeAttachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Submits mail to an authenticated relay over STARTTLS.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotifier {
    pub const DEFAULT_HOST: &str = "smtp.mailersend.net";
    pub const DEFAULT_PORT: u16 = 587;

    pub fn new(config: &SmtpConfig) -> Result<Self, NotificationError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        Ok(Self { transport })
    }
}

fn to_lettre_mailbox(mailbox: &Mailbox) -> Result<lettre::message::Mailbox, NotificationError> {
    let address = mailbox
        .email
        .parse::<lettre::Address>()
        .map_err(|e| NotificationError::InvalidMessage(format!("{}: {e}", mailbox.email)))?;
    Ok(lettre::message::Mailbox::new(mailbox.name.clone(), address))
}

/// Assemble the MIME message. `attachment` carries the already-read file
/// content when the message has an attachment.
fn build_email(
    message: &NotificationMessage,
    attachment: Option<Vec<u8>>,
) -> Result<Message, NotificationError> {
    let builder = Message::builder()
        .from(to_lettre_mailbox(&message.from)?)
        .to(to_lettre_mailbox(&message.to)?)
        .subject(message.subject.clone());
    let text = SinglePart::plain(message.text.clone());

    let email = match (&message.attachment, attachment) {
        (Some(meta), Some(content)) => {
            let content_type = ContentType::parse(&meta.content_type)
                .map_err(|e| NotificationError::InvalidMessage(e.to_string()))?;
            let file = MimeAttachment::new(meta.filename.clone()).body(content, content_type);
            builder.multipart(MultiPart::mixed().singlepart(text).singlepart(file))
        }
        _ => builder.singlepart(text),
    };
    email.map_err(|e| NotificationError::InvalidMessage(e.to_string()))
}

#[async_trait]
impl Notifier for SmtpNotifier {
    #[tracing::instrument(skip_all, err, name = "SMTP:Send", fields(to = %message.to.email))]
    async fn send(&self, message: &NotificationMessage) -> Result<(), NotificationError> {
        let content = match &message.attachment {
            Some(attachment) => Some(attachment.load().await?),
            None => None,
        };
        let email = build_email(message, content)?;
        let response = self.transport.send(email).await?;
        tracing::debug!(code = %response.code(), "SMTP relay accepted message");
        Ok(())
    }
}
