//! Payment gateway and product configuration.

use url::Url;

/// Credentials for the payment gateway.
///
/// The key secret doubles as the HMAC key for payment signatures.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Public key id (`rzp_live_...` / `rzp_test_...`).
    pub key_id: String,
    key_secret: String,
    /// Root URL of the gateway REST API.
    pub api_base: Url,
}

impl GatewayConfig {
    /// Create a new GatewayConfig.
    pub fn new(key_id: String, key_secret: String, api_base: Url) -> Self {
        Self {
            key_id,
            key_secret,
            api_base,
        }
    }

    /// The key secret, for HTTP basic auth against the gateway.
    pub fn key_secret(&self) -> &str {
        &self.key_secret
    }

    /// The key secret bytes, for HMAC signature verification.
    pub fn secret_bytes(&self) -> &[u8] {
        self.key_secret.as_bytes()
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"<redacted>")
            .field("api_base", &self.api_base.as_str())
            .finish()
    }
}

/// The single product sold through `/create-order`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductConfig {
    /// Price in the minor currency unit.
    pub amount: u64,
    /// ISO 4217 currency code.
    pub currency: String,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            amount: 4900,
            currency: "INR".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let config = GatewayConfig::new(
            "rzp_test_abc".to_string(),
            "very-secret".to_string(),
            Url::parse("https://api.razorpay.com/").unwrap(),
        );
        let printed = format!("{config:?}");
        assert!(printed.contains("rzp_test_abc"));
        assert!(!printed.contains("very-secret"));
        assert_eq!(config.secret_bytes(), b"very-secret");
    }
}
