//! Confirmation message template.

use super::{Attachment, Mailbox, NotificationMessage};
use crate::config::MailConfig;

/// Placeholder replaced with the buyer's name.
const NAME_PLACEHOLDER: &str = "{name}";

/// Renders the confirmation email for a buyer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    pub from: Mailbox,
    pub subject: String,
    pub body: String,
    pub attachment: Option<Attachment>,
}

impl MessageTemplate {
    pub const DEFAULT_SUBJECT: &str = "Your AI Pro Guide - ₹49";
    pub const DEFAULT_BODY: &str =
        "Hi {name},\n\nThanks for your purchase! Find your guide attached.\n\nHappy Learning 🚀";

    pub fn from_config(config: &MailConfig) -> Self {
        Self {
            from: config.from.clone(),
            subject: config.subject.clone(),
            body: config.body.clone(),
            attachment: config.attachment.clone(),
        }
    }

    /// Message for the buyer `name <email>`.
    pub fn render(&self, name: &str, email: &str) -> NotificationMessage {
        NotificationMessage {
            from: self.from.clone(),
            to: Mailbox::new(Some(name.to_string()), email),
            subject: self.subject.replace(NAME_PLACEHOLDER, name),
            text: self.body.replace(NAME_PLACEHOLDER, name),
            attachment: self.attachment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_render_default_template() {
        let template = MessageTemplate {
            from: Mailbox::new(Some("AI Pro Guide".into()), "no-reply@example.com"),
            subject: MessageTemplate::DEFAULT_SUBJECT.to_string(),
            body: MessageTemplate::DEFAULT_BODY.to_string(),
            attachment: Some(Attachment {
                filename: "Google-AI-Pro-Guide.pdf".to_string(),
                path: PathBuf::from("./assets/guide.pdf"),
                content_type: "application/pdf".to_string(),
            }),
        };

        let message = template.render("Asha", "asha@example.com");
        assert_eq!(message.to.email, "asha@example.com");
        assert_eq!(message.to.name.as_deref(), Some("Asha"));
        assert_eq!(message.subject, "Your AI Pro Guide - ₹49");
        assert!(message.text.starts_with("Hi Asha,\n\n"));
        assert_eq!(
            message.attachment.unwrap().filename,
            "Google-AI-Pro-Guide.pdf"
        );
    }
}
