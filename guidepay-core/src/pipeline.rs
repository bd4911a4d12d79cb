//! Payment verification pipeline.
//!
//! One run per `/verify-payment` request:
//!
//! ```text
//! Received ──signature ok──▶ SignatureChecked ──append ok──▶ Logged ──send ok──▶ Notified ─▶ Done
//!    │                              │                          │
//!    └─mismatch─▶ Rejected          └─error─▶ Failed           └─error─▶ Failed
//! ```
//!
//! The signature check is pure and runs before anything with side effects.
//! The ledger append completes before any email goes out, so a buyer is never
//! told to expect a guide for a purchase that was not recorded. The reverse
//! gap (recorded, email failed) is reported as a failure to the caller and
//! left for an operator to reconcile from the logs.
//!
//! Verification is not idempotent: submitting the same valid payload twice
//! appends two rows and sends two emails.

use crate::ledger::{Ledger, LedgerError, LedgerRow};
use crate::notifier::{MessageTemplate, NotificationError, Notifier};
use guidepay_sdk::objects::VerificationRequest;
use guidepay_sdk::signature;
use kanau::processor::Processor;
use std::sync::Arc;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, error, info, warn};

/// Where a verification run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationStage {
    Received,
    SignatureChecked,
    Logged,
    Notified,
    Done,
}

impl std::fmt::Display for VerificationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationStage::Received => write!(f, "received"),
            VerificationStage::SignatureChecked => write!(f, "signature_checked"),
            VerificationStage::Logged => write!(f, "logged"),
            VerificationStage::Notified => write!(f, "notified"),
            VerificationStage::Done => write!(f, "done"),
        }
    }
}

/// Errors that end a verification run.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// The signature does not match the order and payment ids.
    #[error("invalid signature")]
    InvalidSignature,

    /// The purchase could not be recorded; no email was sent.
    #[error("ledger append failed: {0}")]
    Ledger(#[source] LedgerError),

    /// The purchase was recorded but the confirmation email failed.
    #[error("notification delivery failed: {0}")]
    Notification(#[source] NotificationError),
}

impl VerificationError {
    /// The last stage reached before the run stopped.
    pub fn stage(&self) -> VerificationStage {
        match self {
            VerificationError::InvalidSignature => VerificationStage::Received,
            VerificationError::Ledger(_) => VerificationStage::SignatureChecked,
            VerificationError::Notification(_) => VerificationStage::Logged,
        }
    }

    /// Whether the caller, not an upstream service, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, VerificationError::InvalidSignature)
    }

    /// Stable, detail-free description suitable for clients.
    pub fn category(&self) -> &'static str {
        match self {
            VerificationError::InvalidSignature => "invalid signature",
            VerificationError::Ledger(_) => "ledger append failed",
            VerificationError::Notification(_) => "notification delivery failed",
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReceipt {
    pub order_id: String,
    pub payment_id: String,
    pub verified_at: OffsetDateTime,
    pub stage: VerificationStage,
}

/// Sequences signature check, ledger append and notification.
pub struct VerificationPipeline {
    secret: Box<[u8]>,
    ledger: Arc<dyn Ledger>,
    notifier: Arc<dyn Notifier>,
    template: MessageTemplate,
}

impl VerificationPipeline {
    /// * `secret` – the gateway key secret the signatures are computed with.
    pub fn new(
        secret: impl Into<Box<[u8]>>,
        ledger: Arc<dyn Ledger>,
        notifier: Arc<dyn Notifier>,
        template: MessageTemplate,
    ) -> Self {
        Self {
            secret: secret.into(),
            ledger,
            notifier,
            template,
        }
    }
}

impl Processor<VerificationRequest> for VerificationPipeline {
    type Output = VerificationReceipt;
    type Error = VerificationError;

    #[tracing::instrument(
        skip_all,
        name = "VerifyPayment",
        fields(order_id = %request.order_id, payment_id = %request.payment_id)
    )]
    async fn process(
        &self,
        request: VerificationRequest,
    ) -> Result<VerificationReceipt, VerificationError> {
        if !signature::verify_payment(
            &request.order_id,
            &request.payment_id,
            &request.signature,
            &self.secret,
        ) {
            warn!("Rejected payment with invalid signature");
            return Err(VerificationError::InvalidSignature);
        }
        debug!(stage = %VerificationStage::SignatureChecked, "Signature verified");

        let verified_at = OffsetDateTime::now_utc();
        let row = LedgerRow {
            verified_at,
            name: request.name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            payment_id: request.payment_id.clone(),
        };
        if let Err(e) = self.ledger.append(&row).await {
            error!(error = %e, "Failed to record verified payment; buyer not notified");
            return Err(VerificationError::Ledger(e));
        }
        debug!(stage = %VerificationStage::Logged, "Payment recorded");

        let message = self.template.render(&request.name, &request.email);
        if let Err(e) = self.notifier.send(&message).await {
            error!(error = %e, "Payment recorded but confirmation email failed");
            return Err(VerificationError::Notification(e));
        }
        debug!(stage = %VerificationStage::Notified, "Confirmation sent");

        info!("Payment verified");
        Ok(VerificationReceipt {
            order_id: request.order_id,
            payment_id: request.payment_id,
            verified_at,
            stage: VerificationStage::Done,
        })
    }
}
