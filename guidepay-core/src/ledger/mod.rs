//! Purchase ledger.
//!
//! Each verified payment appends exactly one row to an external,
//! append-only spreadsheet:
//!
//! ```text
//! | verified at (ISO-8601) | name | email | phone | payment id |
//! ```
//!
//! Appends are not deduplicated. Appending the same row twice produces two
//! rows.

mod google_sheets;
mod service_account;

pub use google_sheets::GoogleSheetsLedger;
pub use service_account::{
    AccessToken, ServiceAccountKey, ServiceAccountTokenProvider, StaticTokenProvider,
    TokenProvider,
};

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// One verified purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    pub verified_at: OffsetDateTime,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub payment_id: String,
}

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

impl LedgerRow {
    /// The verification time as `YYYY-MM-DDTHH:MM:SS.sssZ` (UTC).
    pub fn timestamp(&self) -> String {
        self.verified_at
            .to_offset(time::UtcOffset::UTC)
            .format(TIMESTAMP_FORMAT)
            .unwrap_or_else(|_| self.verified_at.unix_timestamp().to_string())
    }

    /// Cell values in column order. A missing phone is an empty cell.
    pub fn cells(&self) -> [String; 5] {
        [
            self.timestamp(),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone().unwrap_or_default(),
            self.payment_id.clone(),
        ]
    }
}

/// Errors that can occur while appending to the ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Service account key material is unusable
    #[error("invalid service account credentials: {0}")]
    Credentials(String),

    /// Token exchange was refused
    #[error("authentication failed: {0}")]
    Auth(String),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The spreadsheet API answered with a non-success status
    #[error("spreadsheet API error with status {status}: {body}")]
    Api { status: u16, body: String },

    /// The endpoint URL could not be built
    #[error("invalid ledger url: {0}")]
    Url(#[from] url::ParseError),
}

/// Capability to append purchase rows to an append-only store.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn append(&self, row: &LedgerRow) -> Result<(), LedgerError>;
}
