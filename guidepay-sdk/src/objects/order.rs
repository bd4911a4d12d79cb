//! Payment order objects returned by `POST /create-order`.

use serde::{Deserialize, Serialize};

/// A payment order as issued by the gateway.
///
/// Only the fields the backend relies on are typed. Everything else the
/// gateway returns (`entity`, `status`, `amount_due`, `notes`, ...) is kept
/// in `extra` and serialized back out unchanged, so the browser checkout
/// widget receives the complete gateway object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOrder {
    /// Gateway-assigned order id (e.g. `order_Nb2...`).
    pub id: String,
    /// Amount in the minor currency unit (paise for INR).
    pub amount: u64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Receipt label supplied when the order was created.
    pub receipt: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body returned by `POST /create-order` on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderErrorResponse {
    pub error: String,
}
