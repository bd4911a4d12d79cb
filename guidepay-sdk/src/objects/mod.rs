pub mod order;
pub mod verification;

pub use order::{OrderErrorResponse, PaymentOrder};
pub use verification::{
    ValidationError, VerificationRequest, VerifyPaymentBody, VerifyPaymentResponse,
};
