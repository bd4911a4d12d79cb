use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use guidepay_core::gateway::{CreateOrder, GatewayError};
use guidepay_sdk::objects::{OrderErrorResponse, PaymentOrder};
use kanau::processor::Processor;

use crate::state::AppState;

const ORDER_FAILED: &str = "order creation failed";

/// `POST /create-order`: open a gateway order for the configured product.
///
/// Responds with the gateway's order object as-is; the checkout page hands
/// it to the gateway's payment widget.
pub(super) async fn create_order(
    State(state): State<AppState>,
) -> Result<Json<PaymentOrder>, OrderApiError> {
    let order = state
        .orders
        .process(CreateOrder)
        .await
        .map_err(|e| OrderApiError::Gateway {
            detail: state.error_detail(ORDER_FAILED, &e),
            source: e,
        })?;
    Ok(Json(order))
}

/// Errors that can occur in the order handler.
#[derive(Debug)]
pub(super) enum OrderApiError {
    /// The gateway could not be reached or refused the order.
    Gateway { source: GatewayError, detail: String },
}

impl IntoResponse for OrderApiError {
    fn into_response(self) -> Response {
        match self {
            OrderApiError::Gateway { source, detail } => {
                tracing::error!(error = %source, "Error creating order");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(OrderErrorResponse { error: detail }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::server::build_router;
    use crate::state::testing::{default_harness, harness};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use guidepay_core::test_utils::{RecordingLedger, RecordingNotifier, StaticGateway};
    use serde_json::Value;
    use tower::ServiceExt;

    fn create_order_request() -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/create-order")
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_order_returns_gateway_order() {
        let h = default_harness();
        let response = build_router(h.state.clone(), &[])
            .oneshot(create_order_request())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["id"], "order_test1");
        assert_eq!(body["amount"], 4900);
        assert_eq!(body["currency"], "INR");
        assert_eq!(body["entity"], "order");
        assert_eq!(body["status"], "created");
        assert!(body["receipt"].as_str().unwrap().starts_with("receipt_order_"));
    }

    #[tokio::test]
    async fn test_receipts_differ_across_requests() {
        let h = default_harness();
        let router = build_router(h.state.clone(), &[]);
        let first = json_body(router.clone().oneshot(create_order_request()).await.unwrap()).await;
        let second = json_body(router.oneshot(create_order_request()).await.unwrap()).await;

        assert_ne!(first["receipt"], second["receipt"]);
        let calls = h.gateway.calls();
        assert_eq!(calls.len(), 2);
        assert_ne!(calls[0].receipt, calls[1].receipt);
    }

    #[tokio::test]
    async fn test_gateway_failure_is_generic_500() {
        let h = harness(
            RecordingLedger::default(),
            RecordingNotifier::default(),
            StaticGateway::failing(),
            false,
        );
        let response = build_router(h.state.clone(), &[])
            .oneshot(create_order_request())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "order creation failed");
    }

    #[tokio::test]
    async fn test_gateway_failure_detail_when_exposed() {
        let h = harness(
            RecordingLedger::default(),
            RecordingNotifier::default(),
            StaticGateway::failing(),
            true,
        );
        let response = build_router(h.state.clone(), &[])
            .oneshot(create_order_request())
            .await
            .unwrap();

        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("Authentication failed"));
    }
}
