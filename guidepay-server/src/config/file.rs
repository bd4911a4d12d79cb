//! TOML file configuration structures.
//!
//! These structs directly map to the `guidepay.toml` file format. Every
//! section is optional; secrets are usually left out of the file and
//! supplied through the environment instead.

use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
    pub product: ProductConfig,
    pub ledger: LedgerConfig,
    pub mail: MailConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:10000").
    pub listen: SocketAddr,
    /// Browser origins allowed to call the API. Empty allows any origin.
    pub allowed_origins: Vec<String>,
    /// Echo raw upstream errors in 500 responses.
    pub expose_error_details: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 10000)),
            allowed_origins: Vec::new(),
            expose_error_details: false,
        }
    }
}

/// Payment gateway credentials. Overridden by `RAZORPAY_KEY_ID` and
/// `RAZORPAY_KEY_SECRET`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub key_id: Option<String>,
    pub key_secret: Option<String>,
    pub api_base: Option<Url>,
}

/// The product sold through `/create-order`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProductConfig {
    /// Price in the minor currency unit (paise for INR).
    pub amount: u64,
    pub currency: String,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            amount: 4900,
            currency: "INR".to_string(),
        }
    }
}

/// Spreadsheet ledger.
///
/// The sheet id is overridden by `GOOGLE_SHEET_ID`. Service account
/// credentials come from `GOOGLE_CREDENTIALS` (the key JSON inline) or, if
/// that is unset, from `credentials_file`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub spreadsheet_id: Option<String>,
    pub range: String,
    pub credentials_file: Option<PathBuf>,
    pub api_base: Option<Url>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            range: "Sheet1!A:E".to_string(),
            credentials_file: None,
            api_base: None,
        }
    }
}

/// Which mail transport delivers confirmations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MailTransportKind {
    #[default]
    Smtp,
    MailersendApi,
}

/// Mail section. `api_key` is overridden by `MAILERSEND_API_KEY`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub transport: MailTransportKind,
    /// Provider API key. Also the SMTP password unless `smtp.password` is set.
    pub api_key: Option<String>,
    pub from_name: Option<String>,
    pub from_email: String,
    /// Subject line; `{name}` is replaced with the buyer name.
    pub subject: String,
    /// Plain-text body; `{name}` is replaced with the buyer name.
    pub body: String,
    pub smtp: SmtpConfig,
    /// Base URL of the mail HTTP API.
    pub api_base: Option<Url>,
    pub attachment: AttachmentConfig,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: MailTransportKind::Smtp,
            api_key: None,
            from_name: Some("AI Pro Guide".to_string()),
            from_email: "no-reply@test-q3enl6k70k542vwr.mlsender.net".to_string(),
            subject: "Your AI Pro Guide - ₹49".to_string(),
            body: "Hi {name},\n\nThanks for your purchase! Find your guide attached.\n\nHappy Learning 🚀"
                .to_string(),
            smtp: SmtpConfig::default(),
            api_base: None,
            attachment: AttachmentConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Option<String>,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.mailersend.net".to_string(),
            port: 587,
            username: "api".to_string(),
            password: None,
        }
    }
}

/// The file attached to every confirmation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AttachmentConfig {
    pub enabled: bool,
    pub filename: String,
    pub path: PathBuf,
    pub content_type: String,
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            filename: "Google-AI-Pro-Guide.pdf".to_string(),
            path: PathBuf::from("./assets/guide.pdf"),
            content_type: "application/pdf".to_string(),
        }
    }
}
