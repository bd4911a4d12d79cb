//! Razorpay Orders API adapter.

use super::{GatewayError, OrderCreation, OrderGateway};
use crate::config::GatewayConfig;
use async_trait::async_trait;
use guidepay_sdk::objects::PaymentOrder;
use url::Url;

/// Creates orders through `POST /v1/orders` with HTTP basic auth
/// (`key_id:key_secret`).
pub struct RazorpayGateway {
    key_id: String,
    key_secret: String,
    api_base: Url,
    http_client: reqwest::Client,
}

impl RazorpayGateway {
    pub const DEFAULT_API_BASE: &str = "https://api.razorpay.com/";

    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            key_id: config.key_id.clone(),
            key_secret: config.key_secret().to_owned(),
            api_base: config.api_base.clone(),
            http_client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }
}

#[async_trait]
impl OrderGateway for RazorpayGateway {
    #[tracing::instrument(skip_all, err, name = "Razorpay:CreateOrder", fields(receipt = %order.receipt))]
    async fn create_order(&self, order: &OrderCreation) -> Result<PaymentOrder, GatewayError> {
        let url = self.api_base.join("v1/orders")?;
        let response = self
            .http_client
            .post(url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(order)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                description: error_description(&body),
            });
        }

        Ok(response.json().await?)
    }
}

/// Pull `error.description` out of a gateway error body, falling back to the
/// raw body.
fn error_description(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }
    #[derive(serde::Deserialize)]
    struct ErrorDetail {
        description: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.description)
        .unwrap_or_else(|_| body.to_string())
}
