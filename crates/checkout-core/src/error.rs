//! # Checkout Error Types
//!
//! Typed error handling for the checkout backend.
//! All checkout operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Product missing or not in the catalog
    #[error("Invalid product: {product:?}")]
    InvalidProduct { product: String },

    /// Size missing or not offered for a known product
    #[error("Invalid size {size:?} for product {product}")]
    InvalidSize { product: String, size: String },

    /// Quantity present but not a positive integer
    #[error("Invalid quantity: {value}")]
    InvalidQuantity { value: String },

    /// Cart has no lines
    #[error("No items to checkout")]
    NoItems,

    /// Request body could not be read
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration errors (missing keys, invalid catalog)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CheckoutError {
    /// Returns true if the caller sent something we reject before any provider call
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CheckoutError::InvalidProduct { .. }
                | CheckoutError::InvalidSize { .. }
                | CheckoutError::InvalidQuantity { .. }
                | CheckoutError::NoItems
                | CheckoutError::InvalidRequest(_)
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }

    /// Message safe to show the caller.
    ///
    /// Server-side errors collapse to one generic string; the detail stays in logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            CheckoutError::InvalidProduct { .. } => "Invalid product",
            CheckoutError::InvalidSize { .. } => "Invalid size",
            CheckoutError::InvalidQuantity { .. } => "Invalid quantity",
            CheckoutError::NoItems => "No items to checkout",
            CheckoutError::InvalidRequest(_) => "Invalid request body",
            CheckoutError::Configuration(_)
            | CheckoutError::ProviderError { .. }
            | CheckoutError::NetworkError(_)
            | CheckoutError::Serialization(_)
            | CheckoutError::Internal(_) => "Internal server error",
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CheckoutError::InvalidProduct {
                product: "red-sweatpants".into()
            }
            .status_code(),
            400
        );
        assert_eq!(CheckoutError::NoItems.status_code(), 400);
        assert_eq!(
            CheckoutError::ProviderError {
                provider: "stripe".into(),
                message: "No such price".into()
            }
            .status_code(),
            500
        );
        assert_eq!(CheckoutError::NetworkError("reset".into()).status_code(), 500);
    }

    #[test]
    fn test_public_message_hides_provider_detail() {
        let err = CheckoutError::ProviderError {
            provider: "stripe".into(),
            message: "No such price: 'price_abc'".into(),
        };

        assert_eq!(err.public_message(), "Internal server error");
        assert!(err.to_string().contains("price_abc"));
    }

    #[test]
    fn test_validation_messages() {
        let size = CheckoutError::InvalidSize {
            product: "white-sweatpants".into(),
            size: "XXL".into(),
        };
        assert_eq!(size.public_message(), "Invalid size");
        assert!(size.is_client_error());
        assert_eq!(CheckoutError::NoItems.public_message(), "No items to checkout");
    }
}
