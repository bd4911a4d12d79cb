//! Custom Axum extractors for request validation.
//!
//! Provides `ValidPayment`, which reads the `/verify-payment` JSON body and
//! validates it into a [`VerificationRequest`] before the handler runs.
//! Signature checking is left to the verification pipeline.

use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use guidepay_sdk::objects::{
    ValidationError, VerificationRequest, VerifyPaymentBody, VerifyPaymentResponse,
};

/// Largest accepted request body.
const BODY_LIMIT: usize = 1024 * 1024;

/// An Axum extractor that deserializes and validates a verification body.
///
/// Rejections are `400` with the same `{success, message}` shape as every
/// other `/verify-payment` response.
pub struct ValidPayment(pub VerificationRequest);

/// Errors that can occur while extracting a [`ValidPayment`].
#[derive(Debug, thiserror::Error)]
pub enum ValidPaymentError {
    #[error("failed to read request body")]
    BodyReadError,
    #[error("invalid JSON body: {0}")]
    JsonError(serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl IntoResponse for ValidPaymentError {
    fn into_response(self) -> Response {
        let message = match &self {
            ValidPaymentError::BodyReadError => "Failed to read request body".to_string(),
            ValidPaymentError::JsonError(_) => "Invalid JSON body".to_string(),
            ValidPaymentError::Invalid(e) => e.to_string(),
        };
        tracing::debug!(error = %self, "Rejected verification request");
        (
            StatusCode::BAD_REQUEST,
            Json(VerifyPaymentResponse::rejected(message)),
        )
            .into_response()
    }
}

impl<S: Send + Sync> FromRequest<S> for ValidPayment {
    type Rejection = ValidPaymentError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let body_bytes = axum::body::to_bytes(req.into_body(), BODY_LIMIT)
            .await
            .map_err(|_| ValidPaymentError::BodyReadError)?;

        let body: VerifyPaymentBody =
            serde_json::from_slice(&body_bytes).map_err(ValidPaymentError::JsonError)?;

        Ok(ValidPayment(body.validate()?))
    }
}
