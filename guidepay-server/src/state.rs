//! Application state shared across all request handlers.

use guidepay_core::gateway::OrderService;
use guidepay_core::pipeline::VerificationPipeline;
use std::sync::Arc;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
/// Nothing in it is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Signature check, ledger append and confirmation email.
    pub pipeline: Arc<VerificationPipeline>,
    /// Gateway order creation.
    pub orders: Arc<OrderService>,
    /// Echo raw upstream errors in 500 responses.
    pub expose_error_details: bool,
}

impl AppState {
    pub fn new(
        pipeline: VerificationPipeline,
        orders: OrderService,
        expose_error_details: bool,
    ) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            orders: Arc::new(orders),
            expose_error_details,
        }
    }

    /// The `error` field of a 500 body: the raw error when detail exposure
    /// is on, the stable category otherwise.
    pub fn error_detail(&self, category: &str, error: &dyn std::fmt::Display) -> String {
        if self.expose_error_details {
            error.to_string()
        } else {
            category.to_string()
        }
    }
}
