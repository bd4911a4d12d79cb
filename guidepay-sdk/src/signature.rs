//! Payment signature algorithm and verification.
//!
//! After a successful checkout the gateway hands the browser three values:
//! the order id, the payment id and a signature. The signature is
//!
//! ```text
//! hex(HMAC-SHA256(key_secret, "{order_id}|{payment_id}"))
//! ```
//!
//! The key secret never leaves the backend, so a matching signature is the
//! only proof that the gateway issued this payment id for this order.

/// Separator placed between the order id and payment id in the signed payload.
pub const PAYLOAD_SEPARATOR: char = '|';

/// Build the exact byte string that the gateway signs.
pub fn payment_signature_payload(order_id: &str, payment_id: &str) -> String {
    format!("{order_id}{PAYLOAD_SEPARATOR}{payment_id}")
}

/// Length of a hex-encoded HMAC-SHA256 tag.
const SIGNATURE_HEX_LEN: usize = 64;

fn hmac_key(secret: &[u8]) -> ring::hmac::Key {
    ring::hmac::Key::new(ring::hmac::HMAC_SHA256, secret)
}

/// Compute the lowercase hex signature for an order / payment pair.
pub fn sign_payment(order_id: &str, payment_id: &str, secret: &[u8]) -> String {
    let payload = payment_signature_payload(order_id, payment_id);
    let tag = ring::hmac::sign(&hmac_key(secret), payload.as_bytes());
    hex::encode(tag.as_ref())
}

/// Check a client-submitted signature.
///
/// Returns `true` only if `signature` is exactly the lowercase hex encoding
/// of `HMAC-SHA256(secret, "{order_id}|{payment_id}")`. Uppercase hex,
/// malformed hex, a truncated digest or empty inputs are simply a mismatch.
/// The tag comparison runs in constant time.
pub fn verify_payment(order_id: &str, payment_id: &str, signature: &str, secret: &[u8]) -> bool {
    if signature.len() != SIGNATURE_HEX_LEN
        || !signature.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    {
        return false;
    }
    let Ok(signature) = hex::decode(signature) else {
        return false;
    };
    let payload = payment_signature_payload(order_id, payment_id);
    ring::hmac::verify(&hmac_key(secret), payload.as_bytes(), &signature).is_ok()
}
