//! Payment gateway: order creation.
//!
//! The backend never touches card data. It only asks the gateway to open an
//! order for the fixed product price and hands the gateway's order object to
//! the browser, which completes the payment directly with the gateway.

mod razorpay;
mod receipt;

pub use razorpay::RazorpayGateway;
pub use receipt::{RECEIPT_PREFIX, ReceiptGenerator};

use crate::config::ProductConfig;
use async_trait::async_trait;
use guidepay_sdk::objects::PaymentOrder;
use kanau::processor::Processor;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Order parameters sent to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderCreation {
    pub amount: u64,
    pub currency: String,
    pub receipt: String,
}

/// Errors that can occur while creating an order.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway answered with a non-success status
    #[error("gateway rejected the order with status {status}: {description}")]
    Api { status: u16, description: String },

    /// The endpoint URL could not be built
    #[error("invalid gateway url: {0}")]
    Url(#[from] url::ParseError),
}

/// Capability to open orders with a payment gateway.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn create_order(&self, order: &OrderCreation) -> Result<PaymentOrder, GatewayError>;
}

/// Request to open a new order for the configured product.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateOrder;

/// Opens gateway orders for the configured product, each with a fresh
/// receipt label.
pub struct OrderService {
    gateway: Arc<dyn OrderGateway>,
    receipts: ReceiptGenerator,
    product: ProductConfig,
}

impl OrderService {
    pub fn new(gateway: Arc<dyn OrderGateway>, product: &ProductConfig) -> Self {
        Self {
            gateway,
            receipts: ReceiptGenerator::new(),
            product: product.clone(),
        }
    }
}

impl Processor<CreateOrder> for OrderService {
    type Output = PaymentOrder;
    type Error = GatewayError;

    async fn process(&self, _: CreateOrder) -> Result<PaymentOrder, GatewayError> {
        let creation = OrderCreation {
            amount: self.product.amount,
            currency: self.product.currency.clone(),
            receipt: self.receipts.next_label(),
        };
        let order = self.gateway.create_order(&creation).await?;
        tracing::info!(
            order_id = %order.id,
            receipt = %order.receipt,
            amount = order.amount,
            "Order created"
        );
        Ok(order)
    }
}
