//! Spreadsheet ledger configuration.

use crate::ledger::ServiceAccountKey;
use url::Url;

/// Where verified purchases are appended.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Spreadsheet id (the long token in the sheet URL).
    pub spreadsheet_id: String,
    /// A1 range the rows are appended to, e.g. `Sheet1!A:E`.
    pub range: String,
    /// Service account used to obtain access tokens.
    pub credentials: ServiceAccountKey,
    /// Root URL of the Sheets REST API.
    pub api_base: Url,
}
