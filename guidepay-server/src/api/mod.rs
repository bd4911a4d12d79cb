//! HTTP API handlers.
//!
//! # Endpoints
//!
//! - `POST /create-order`   – open a gateway order for the product
//! - `POST /verify-payment` – verify, record and confirm a payment

pub mod extractors;
pub mod orders;
pub mod verify;

use crate::state::AppState;
use axum::{Router, routing::post};

/// Build the checkout API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-order", post(orders::create_order))
        .route("/verify-payment", post(verify::verify_payment))
}
