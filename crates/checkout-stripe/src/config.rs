//! # Stripe Configuration
//!
//! Configuration management for Stripe integration.
//! The secret key is read once, at startup.

use checkout_core::CheckoutError;
use std::fmt;

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";
const DEFAULT_API_VERSION: &str = "2024-12-18.acacia";
const KEY_PREFIXES: &[&str] = &["sk_test_", "sk_live_", "rk_test_", "rk_live_"];

/// Stripe API configuration
#[derive(Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_..., restricted rk_ keys also work)
    pub secret_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,
}

impl StripeConfig {
    /// Load configuration from any variable source.
    ///
    /// Required:
    /// - `STRIPE_SECRET_KEY`
    ///
    /// Optional:
    /// - `STRIPE_API_BASE` (defaults to `https://api.stripe.com`)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CheckoutError> {
        let secret_key = lookup("STRIPE_SECRET_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| CheckoutError::Configuration("STRIPE_SECRET_KEY is not set".to_string()))?;

        let config = Self::new(secret_key);
        config.validate()?;

        match lookup("STRIPE_API_BASE") {
            Some(base) if !base.trim().is_empty() => Ok(config.with_api_base_url(base.trim())),
            _ => Ok(config),
        }
    }

    /// Create config with an explicit key (for testing)
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Check the key looks like a Stripe secret or restricted key
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if KEY_PREFIXES.iter().any(|p| self.secret_key.starts_with(p)) {
            Ok(())
        } else {
            Err(CheckoutError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_test_, sk_live_, rk_test_ or rk_live_"
                    .to_string(),
            ))
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_") || self.secret_key.starts_with("rk_test_")
    }

    /// `"test"` or `"live"`, for startup logging
    pub fn mode(&self) -> &'static str {
        if self.is_test_mode() {
            "test"
        } else {
            "live"
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.api_base_url = url.trim_end_matches('/').to_string();
        self
    }
}

impl fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<StripeConfig, CheckoutError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StripeConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_config_modes() {
        let config = StripeConfig::new("sk_test_abc123");
        assert!(config.validate().is_ok());
        assert_eq!(config.mode(), "test");

        let config = StripeConfig::new("sk_live_abc123");
        assert!(config.validate().is_ok());
        assert_eq!(config.mode(), "live");

        assert_eq!(StripeConfig::new("rk_test_abc123").mode(), "test");
        assert_eq!(StripeConfig::new("rk_live_abc123").mode(), "live");
    }

    #[test]
    fn test_mode_uses_key_prefix() {
        assert_eq!(StripeConfig::new("sk_live_x_test_y").mode(), "live");
    }

    #[test]
    fn test_secret_key_required() {
        for vars in [&[][..], &[("STRIPE_SECRET_KEY", "")][..], &[("STRIPE_SECRET_KEY", "  ")][..]] {
            let err = config_from(vars).unwrap_err();
            assert!(matches!(err, CheckoutError::Configuration(_)));
            assert!(err.to_string().contains("STRIPE_SECRET_KEY"));
        }
    }

    #[test]
    fn test_publishable_key_rejected() {
        let err = config_from(&[("STRIPE_SECRET_KEY", "pk_test_abc123")]).unwrap_err();
        assert!(matches!(err, CheckoutError::Configuration(_)));
    }

    #[test]
    fn test_from_lookup_defaults_and_override() {
        let config = config_from(&[("STRIPE_SECRET_KEY", " sk_test_abc123 ")]).unwrap();
        assert_eq!(config.secret_key, "sk_test_abc123");
        assert_eq!(config.api_base_url, "https://api.stripe.com");

        let config = config_from(&[
            ("STRIPE_SECRET_KEY", "sk_test_abc123"),
            ("STRIPE_API_BASE", "http://127.0.0.1:12111/"),
        ])
        .unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:12111");
    }

    #[test]
    fn test_rejects_malformed_key() {
        assert!(StripeConfig::new("pk_test_abc123").validate().is_err());
        assert!(StripeConfig::new("").validate().is_err());
    }

    #[test]
    fn test_auth_header() {
        let config = StripeConfig::new("sk_test_abc123");
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
    }

    #[test]
    fn test_api_base_override() {
        let config = StripeConfig::new("sk_test_abc123").with_api_base_url("http://127.0.0.1:9999/");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = StripeConfig::new("sk_test_supersecret");
        let debug = format!("{:?}", config);

        assert!(!debug.contains("supersecret"));
        assert!(debug.contains("<redacted>"));
    }
}
