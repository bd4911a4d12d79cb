use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use guidepay_core::pipeline::VerificationError;
use guidepay_sdk::objects::VerifyPaymentResponse;
use kanau::processor::Processor;

use crate::api::extractors::ValidPayment;
use crate::state::AppState;

const VERIFIED_MESSAGE: &str = "Payment verified, PDF sent.";
const INVALID_SIGNATURE_MESSAGE: &str = "Invalid signature";

/// `POST /verify-payment`: verify the gateway signature, record the
/// purchase and email the guide.
///
/// Each call runs the pipeline once; resubmitting the same payment records
/// and emails it again.
pub(super) async fn verify_payment(
    State(state): State<AppState>,
    ValidPayment(request): ValidPayment,
) -> Result<Json<VerifyPaymentResponse>, VerifyApiError> {
    match state.pipeline.process(request).await {
        Ok(_) => Ok(Json(VerifyPaymentResponse::verified(VERIFIED_MESSAGE))),
        Err(e) if e.is_client_error() => Err(VerifyApiError::InvalidSignature),
        Err(e) => Err(VerifyApiError::Upstream {
            detail: state.error_detail(e.category(), &e),
            source: e,
        }),
    }
}

/// Errors that can occur in the verification handler.
#[derive(Debug)]
pub(super) enum VerifyApiError {
    /// The signature did not match; nothing was recorded.
    InvalidSignature,
    /// The ledger or the mail service failed.
    Upstream {
        source: VerificationError,
        detail: String,
    },
}

impl IntoResponse for VerifyApiError {
    fn into_response(self) -> Response {
        match self {
            VerifyApiError::InvalidSignature => (
                StatusCode::BAD_REQUEST,
                Json(VerifyPaymentResponse::rejected(INVALID_SIGNATURE_MESSAGE)),
            )
                .into_response(),
            VerifyApiError::Upstream { source, detail } => {
                tracing::debug!(stage = %source.stage(), "Verification failed upstream");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(VerifyPaymentResponse::server_error(detail)),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::server::build_router;
    use crate::state::testing::{Harness, SECRET, default_harness, harness};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use guidepay_core::test_utils::{RecordingLedger, RecordingNotifier, StaticGateway};
    use guidepay_sdk::signature::sign_payment;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn signed_payload(secret: &str) -> Value {
        json!({
            "razorpay_order_id": "order_1",
            "razorpay_payment_id": "pay_1",
            "razorpay_signature": sign_payment("order_1", "pay_1", secret.as_bytes()),
            "name": "Asha",
            "email": "asha@example.com",
            "phone": "9999999999",
        })
    }

    async fn post(h: &Harness, body: impl Into<Body>) -> (StatusCode, Value) {
        let response = build_router(h.state.clone(), &[])
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/verify-payment")
                    .header("content-type", "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_json(h: &Harness, payload: &Value) -> (StatusCode, Value) {
        post(h, serde_json::to_vec(payload).unwrap()).await
    }

    #[tokio::test]
    async fn test_valid_payment() {
        let h = default_harness();
        let (status, body) = post_json(&h, &signed_payload(SECRET)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success": true, "message": "Payment verified, PDF sent."})
        );

        let rows = h.ledger.rows();
        assert_eq!(rows.len(), 1);
        let cells = rows[0].cells();
        assert_eq!(cells[1..], ["Asha", "asha@example.com", "9999999999", "pay_1"]);

        let sent = h.notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to.email, "asha@example.com");
    }

    #[tokio::test]
    async fn test_invalid_signature() {
        let h = default_harness();
        let (status, body) = post_json(&h, &signed_payload("not-the-secret")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"success": false, "message": "Invalid signature"}));
        assert_eq!(h.ledger.call_count(), 0);
        assert_eq!(h.notifier.call_count(), 0);
    }

    #[tokio::test]
    async fn test_ledger_failure() {
        let h = harness(
            RecordingLedger::failing(),
            RecordingNotifier::default(),
            StaticGateway::default(),
            false,
        );
        let (status, body) = post_json(&h, &signed_payload(SECRET)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"success": false, "message": "Server error", "error": "ledger append failed"})
        );
        assert_eq!(h.ledger.call_count(), 1);
        assert_eq!(h.notifier.call_count(), 0);
    }

    #[tokio::test]
    async fn test_notifier_failure_after_row_written() {
        let h = harness(
            RecordingLedger::default(),
            RecordingNotifier::failing(),
            StaticGateway::default(),
            false,
        );
        let (status, body) = post_json(&h, &signed_payload(SECRET)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Server error");
        assert_eq!(body["error"], "notification delivery failed");
        assert_eq!(h.ledger.rows().len(), 1);
        assert_eq!(h.notifier.call_count(), 1);
    }

    #[tokio::test]
    async fn test_upstream_detail_when_exposed() {
        let h = harness(
            RecordingLedger::failing(),
            RecordingNotifier::default(),
            StaticGateway::default(),
            true,
        );
        let (_, body) = post_json(&h, &signed_payload(SECRET)).await;
        assert!(body["error"].as_str().unwrap().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_repeated_submission_records_twice() {
        let h = default_harness();
        let payload = signed_payload(SECRET);

        assert_eq!(post_json(&h, &payload).await.0, StatusCode::OK);
        assert_eq!(post_json(&h, &payload).await.0, StatusCode::OK);

        let rows = h.ledger.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].payment_id, rows[1].payment_id);
        assert_eq!(h.notifier.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_fields_rejected_before_pipeline() {
        let h = default_harness();
        for field in ["razorpay_order_id", "razorpay_payment_id", "razorpay_signature", "email"] {
            let mut payload = signed_payload(SECRET);
            payload.as_object_mut().unwrap().remove(field);

            let (status, body) = post_json(&h, &payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{field}");
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], format!("Missing required field: {field}"));
        }
        assert_eq!(h.ledger.call_count(), 0);
        assert_eq!(h.notifier.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_phone_is_blank_cell() {
        let h = default_harness();
        let mut payload = signed_payload(SECRET);
        payload.as_object_mut().unwrap().remove("phone");

        let (status, _) = post_json(&h, &payload).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(h.ledger.rows()[0].cells()[3], "");
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let h = default_harness();
        let (status, body) = post(&h, "{\"razorpay_order_id\": ").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"success": false, "message": "Invalid JSON body"}));
    }
}
