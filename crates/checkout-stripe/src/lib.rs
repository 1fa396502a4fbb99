//! # checkout-stripe
//!
//! Stripe payment strategy for the Solen checkout backend.
//!
//! **StripeCheckoutStrategy** creates hosted Checkout Sessions whose line
//! items reference catalog Price IDs.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_stripe::{StripeCheckoutStrategy, StripeConfig};
//! use checkout_core::PaymentStrategy;
//!
//! // Create strategy from environment
//! let config = StripeConfig::from_lookup(|key| std::env::var(key).ok())?;
//! let strategy = StripeCheckoutStrategy::new(config)?;
//!
//! // Create checkout session
//! let session = strategy.create_checkout(
//!     &order,
//!     "https://solen.shop/success",
//!     "https://solen.shop/cancel",
//! ).await?;
//!
//! // Redirect user to session.checkout_url
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::StripeCheckoutStrategy;
pub use config::StripeConfig;
