//! Configuration module for guidepay-server.
//!
//! Handles loading configuration from the TOML file, CLI arguments,
//! and environment variables, and validates the result into the core
//! [`RuntimeConfig`].

pub mod file;

use crate::config::file::{FileConfig, MailTransportKind};
use guidepay_core::config::{
    GatewayConfig, LedgerConfig, MailConfig, MailTransport, MailerSendConfig, ProductConfig,
    RuntimeConfig, ServerConfig, SmtpConfig,
};
use guidepay_core::gateway::RazorpayGateway;
use guidepay_core::ledger::{GoogleSheetsLedger, ServiceAccountKey};
use guidepay_core::notifier::{Attachment, Mailbox, MailerSendNotifier};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

pub const ENV_KEY_ID: &str = "RAZORPAY_KEY_ID";
pub const ENV_KEY_SECRET: &str = "RAZORPAY_KEY_SECRET";
pub const ENV_SHEET_ID: &str = "GOOGLE_SHEET_ID";
pub const ENV_CREDENTIALS: &str = "GOOGLE_CREDENTIALS";
pub const ENV_MAIL_API_KEY: &str = "MAILERSEND_API_KEY";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("missing required setting: {0}")]
    Missing(&'static str),

    #[error("invalid service account credentials: {0}")]
    Credentials(#[from] serde_json::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    listen_override: Option<SocketAddr>,
    port_override: Option<u16>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(
        config_path: impl AsRef<Path>,
        listen_override: Option<SocketAddr>,
        port_override: Option<u16>,
    ) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
            port_override,
        }
    }

    /// Load and process the configuration from the file and the process
    /// environment.
    pub fn load(&self) -> Result<RuntimeConfig, ConfigError> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// Load the configuration, resolving environment variables through `env`.
    ///
    /// This will:
    /// 1. Read the TOML file (a missing file means all defaults)
    /// 2. Apply environment and CLI overrides
    /// 3. Validate and build the runtime configuration
    pub fn load_with_env(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<RuntimeConfig, ConfigError> {
        let file_config = match std::fs::read_to_string(&self.config_path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    path = ?self.config_path,
                    "Config file not found, using defaults and environment"
                );
                FileConfig::default()
            }
            Err(source) => {
                return Err(ConfigError::IoError {
                    path: self.config_path.clone(),
                    source,
                });
            }
        };

        self.build(file_config, &env)
    }

    fn build(
        &self,
        file: FileConfig,
        env: &impl Fn(&str) -> Option<String>,
    ) -> Result<RuntimeConfig, ConfigError> {
        let mut listen = self.listen_override.unwrap_or(file.server.listen);
        if let Some(port) = self.port_override {
            listen.set_port(port);
        }

        let server = ServerConfig {
            listen,
            allowed_origins: file.server.allowed_origins,
            expose_error_details: file.server.expose_error_details,
        };

        let gateway = GatewayConfig::new(
            setting(env(ENV_KEY_ID), file.gateway.key_id, "gateway.key_id")?,
            setting(
                env(ENV_KEY_SECRET),
                file.gateway.key_secret,
                "gateway.key_secret",
            )?,
            api_base(file.gateway.api_base, RazorpayGateway::DEFAULT_API_BASE)?,
        );

        let product = ProductConfig {
            amount: file.product.amount,
            currency: file.product.currency,
        };
        validate_product(&product)?;

        let credentials_json = match env(ENV_CREDENTIALS).filter(|v| !v.trim().is_empty()) {
            Some(json) => json,
            None => {
                let path = file
                    .ledger
                    .credentials_file
                    .ok_or(ConfigError::Missing("ledger.credentials_file"))?;
                std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::IoError { path, source })?
            }
        };
        let ledger = LedgerConfig {
            spreadsheet_id: setting(
                env(ENV_SHEET_ID),
                file.ledger.spreadsheet_id,
                "ledger.spreadsheet_id",
            )?,
            range: file.ledger.range,
            credentials: ServiceAccountKey::from_json(&credentials_json)?,
            api_base: api_base(file.ledger.api_base, GoogleSheetsLedger::DEFAULT_API_BASE)?,
        };

        let mail = build_mail(file.mail, env)?;

        Ok(RuntimeConfig {
            server,
            gateway,
            product,
            ledger,
            mail,
        })
    }
}

/// Environment value if set and non-blank, otherwise the file value if
/// non-blank.
fn setting(
    from_env: Option<String>,
    from_file: Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    from_env
        .into_iter()
        .chain(from_file)
        .find(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

/// Resolve an upstream base URL.
///
/// Request paths are joined onto the base, so its path always ends with `/`;
/// otherwise `join` would replace the last segment.
fn api_base(configured: Option<Url>, default: &str) -> Result<Url, ConfigError> {
    let mut url = match configured {
        Some(url) => url,
        None => Url::parse(default)
            .map_err(|e| ConfigError::ValidationError(format!("{default}: {e}")))?,
    };
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn validate_product(product: &ProductConfig) -> Result<(), ConfigError> {
    if product.amount == 0 {
        return Err(ConfigError::ValidationError(
            "product.amount must be greater than zero".to_string(),
        ));
    }
    if product.currency.len() != 3 || !product.currency.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ConfigError::ValidationError(format!(
            "product.currency must be a 3-letter ISO 4217 code, got {:?}",
            product.currency
        )));
    }
    Ok(())
}

fn build_mail(
    mail: file::MailConfig,
    env: &impl Fn(&str) -> Option<String>,
) -> Result<MailConfig, ConfigError> {
    if !mail.from_email.contains('@') {
        return Err(ConfigError::ValidationError(format!(
            "mail.from_email is not an email address: {:?}",
            mail.from_email
        )));
    }

    let api_key = setting(env(ENV_MAIL_API_KEY), mail.api_key, "mail.api_key");
    let transport = match mail.transport {
        MailTransportKind::Smtp => {
            // The SMTP password falls back to the provider API key.
            let password = match mail.smtp.password.filter(|p| !p.trim().is_empty()) {
                Some(password) => password,
                None => api_key?,
            };
            MailTransport::Smtp(SmtpConfig {
                host: mail.smtp.host,
                port: mail.smtp.port,
                username: mail.smtp.username,
                password,
            })
        }
        MailTransportKind::MailersendApi => MailTransport::MailerSendApi(MailerSendConfig {
            api_key: api_key?,
            api_base: api_base(mail.api_base, MailerSendNotifier::DEFAULT_API_BASE)?,
        }),
    };

    let attachment = if mail.attachment.enabled {
        if !mail.attachment.path.is_file() {
            return Err(ConfigError::ValidationError(format!(
                "mail attachment {:?} does not exist",
                mail.attachment.path
            )));
        }
        Some(Attachment {
            filename: mail.attachment.filename,
            path: mail.attachment.path,
            content_type: mail.attachment.content_type,
        })
    } else {
        None
    };

    Ok(MailConfig {
        transport,
        from: Mailbox::new(mail.from_name, mail.from_email),
        subject: mail.subject,
        body: mail.body,
        attachment,
    })
}
