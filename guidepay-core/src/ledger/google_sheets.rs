//! Google Sheets `values.append` adapter.

use super::{Ledger, LedgerError, LedgerRow, ServiceAccountTokenProvider, TokenProvider};
use crate::config::LedgerConfig;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use url::Url;

/// Appends ledger rows to a fixed spreadsheet range.
///
/// Values are sent with `valueInputOption=USER_ENTERED`, so the timestamp
/// cell is parsed by Sheets the same way as if typed into the UI.
pub struct GoogleSheetsLedger {
    spreadsheet_id: String,
    range: String,
    api_base: Url,
    tokens: Arc<dyn TokenProvider>,
    http_client: reqwest::Client,
}

#[derive(Serialize)]
struct ValueRange<'a> {
    values: [&'a [String]; 1],
}

impl GoogleSheetsLedger {
    pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/";
    pub const DEFAULT_RANGE: &str = "Sheet1!A:E";

    /// Build a ledger authenticating with the configured service account.
    pub fn new(config: &LedgerConfig) -> Result<Self, LedgerError> {
        let tokens = ServiceAccountTokenProvider::new(config.credentials.clone())?;
        Ok(Self::with_token_provider(config, Arc::new(tokens)))
    }

    /// Build a ledger with a custom token source.
    pub fn with_token_provider(config: &LedgerConfig, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            spreadsheet_id: config.spreadsheet_id.clone(),
            range: config.range.clone(),
            api_base: config.api_base.clone(),
            tokens,
            http_client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    fn append_url(&self) -> Result<Url, url::ParseError> {
        let path = format!(
            "v4/spreadsheets/{}/values/{}:append",
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(&self.range),
        );
        let mut url = self.api_base.join(&path)?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");
        Ok(url)
    }
}

#[async_trait]
impl Ledger for GoogleSheetsLedger {
    #[tracing::instrument(skip_all, err, name = "Sheets:Append", fields(payment_id = %row.payment_id))]
    async fn append(&self, row: &LedgerRow) -> Result<(), LedgerError> {
        let token = self.tokens.access_token().await?;
        let cells = row.cells();
        let response = self
            .http_client
            .post(self.append_url()?)
            .bearer_auth(token)
            .json(&ValueRange { values: [&cells] })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LedgerError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(range = %self.range, "Ledger row appended");
        Ok(())
    }
}
