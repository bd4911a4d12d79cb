//! Configuration types for guidepay.
//!
//! These types represent the validated runtime configuration. They are built
//! once at startup by the server crate and handed by reference to each
//! component's constructor; nothing in this crate reads the environment.

mod gateway;
mod ledger;
mod mail;
mod server;

pub use gateway::{GatewayConfig, ProductConfig};
pub use ledger::LedgerConfig;
pub use mail::{MailConfig, MailTransport, MailerSendConfig, SmtpConfig};
pub use server::ServerConfig;

/// The complete validated configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// HTTP listener and response policy.
    pub server: ServerConfig,
    /// Payment gateway credentials.
    pub gateway: GatewayConfig,
    /// What is being sold.
    pub product: ProductConfig,
    /// Spreadsheet ledger target and credentials.
    pub ledger: LedgerConfig,
    /// Mail transport and confirmation message template.
    pub mail: MailConfig,
}
