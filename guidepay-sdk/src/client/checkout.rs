//! Checkout client (checkout page or tooling → guidepay server).

use reqwest::Client;
use url::Url;

use super::{ClientError, parse_response};
use crate::objects::{PaymentOrder, VerifyPaymentBody, VerifyPaymentResponse};

/// Typed HTTP client for the two checkout endpoints.
#[derive(Debug, Clone)]
pub struct CheckoutClient {
    http: Client,
    base_url: Url,
}

impl CheckoutClient {
    /// Create a new `CheckoutClient`.
    ///
    /// * `base_url` – root URL of the server (e.g. `https://api.example.com`).
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `POST /create-order` – open a new gateway order for the product.
    pub async fn create_order(&self) -> Result<PaymentOrder, ClientError> {
        let url = self.base_url.join("/create-order")?;
        let resp = self.http.post(url).send().await?;
        parse_response(resp).await
    }

    /// `POST /verify-payment` – submit the gateway's checkout result.
    ///
    /// A rejected signature or a server failure comes back as
    /// [`ClientError::Api`] carrying the JSON body.
    pub async fn verify_payment(
        &self,
        body: &VerifyPaymentBody,
    ) -> Result<VerifyPaymentResponse, ClientError> {
        let url = self.base_url.join("/verify-payment")?;
        let resp = self.http.post(url).json(body).send().await?;
        parse_response(resp).await
    }
}
