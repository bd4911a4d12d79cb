//! Objects for `POST /verify-payment`.

use serde::{Deserialize, Serialize};

/// Raw JSON body posted by the checkout page after the gateway reports a
/// successful payment.
///
/// Every field is optional on the wire; [`VerifyPaymentBody::validate`]
/// turns it into a [`VerificationRequest`] or a [`ValidationError`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyPaymentBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub razorpay_order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub razorpay_payment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub razorpay_signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A structurally valid verification request.
///
/// The gateway identifiers and the signature are guaranteed non-empty; the
/// signature itself has not been checked yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Why a [`VerifyPaymentBody`] was rejected before signature checking.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid email address")]
    InvalidEmail,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

impl VerifyPaymentBody {
    /// Validate the body.
    ///
    /// Gateway identifiers and the signature are taken verbatim (they are
    /// signed values). Name, email and phone are trimmed; an empty phone is
    /// treated as absent.
    pub fn validate(self) -> Result<VerificationRequest, ValidationError> {
        let order_id = required(self.razorpay_order_id, "razorpay_order_id")?;
        let payment_id = required(self.razorpay_payment_id, "razorpay_payment_id")?;
        let signature = required(self.razorpay_signature, "razorpay_signature")?;
        let name = self
            .name
            .map(|n| n.trim().to_owned())
            .ok_or(ValidationError::MissingField("name"))?;
        let email = required(self.email, "email")?.trim().to_owned();
        if !looks_like_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }
        let phone = self
            .phone
            .map(|p| p.trim().to_owned())
            .filter(|p| !p.is_empty());

        Ok(VerificationRequest {
            order_id,
            payment_id,
            signature,
            name,
            email,
            phone,
        })
    }
}

/// Response body of `POST /verify-payment`, for every status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerifyPaymentResponse {
    pub fn verified(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: None,
        }
    }

    pub fn server_error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: "Server error".to_string(),
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_body() -> VerifyPaymentBody {
        VerifyPaymentBody {
            razorpay_order_id: Some("order_1".into()),
            razorpay_payment_id: Some("pay_1".into()),
            razorpay_signature: Some("ab".repeat(32)),
            name: Some(" Asha ".into()),
            email: Some("asha@example.com ".into()),
            phone: Some("9999999999".into()),
        }
    }

    #[test]
    fn test_validate_full_body() {
        let req = full_body().validate().unwrap();
        assert_eq!(req.order_id, "order_1");
        assert_eq!(req.payment_id, "pay_1");
        assert_eq!(req.name, "Asha");
        assert_eq!(req.email, "asha@example.com");
        assert_eq!(req.phone.as_deref(), Some("9999999999"));
    }

    #[test]
    fn test_missing_gateway_fields() {
        let mut body = full_body();
        body.razorpay_order_id = None;
        assert_eq!(
            body.validate(),
            Err(ValidationError::MissingField("razorpay_order_id"))
        );

        let mut body = full_body();
        body.razorpay_payment_id = Some(String::new());
        assert_eq!(
            body.validate(),
            Err(ValidationError::MissingField("razorpay_payment_id"))
        );

        let mut body = full_body();
        body.razorpay_signature = Some("   ".into());
        assert_eq!(
            body.validate(),
            Err(ValidationError::MissingField("razorpay_signature"))
        );
    }

    #[test]
    fn test_buyer_fields() {
        let mut body = full_body();
        body.name = None;
        assert_eq!(body.validate(), Err(ValidationError::MissingField("name")));

        let mut body = full_body();
        body.email = None;
        assert_eq!(body.validate(), Err(ValidationError::MissingField("email")));

        let mut body = full_body();
        body.email = Some("not-an-email".into());
        assert_eq!(body.validate(), Err(ValidationError::InvalidEmail));

        let mut body = full_body();
        body.phone = Some("  ".into());
        assert_eq!(body.validate().unwrap().phone, None);
    }

    #[test]
    fn test_wire_field_names() {
        let json = r#"{
            "razorpay_order_id": "order_1",
            "razorpay_payment_id": "pay_1",
            "razorpay_signature": "sig",
            "name": "Asha",
            "email": "asha@example.com"
        }"#;
        let body: VerifyPaymentBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.phone, None);
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_response_shapes() {
        let ok = serde_json::to_value(VerifyPaymentResponse::verified("done")).unwrap();
        assert_eq!(ok, serde_json::json!({"success": true, "message": "done"}));

        let err = serde_json::to_value(VerifyPaymentResponse::server_error("boom")).unwrap();
        assert_eq!(
            err,
            serde_json::json!({"success": false, "message": "Server error", "error": "boom"})
        );
    }
}
