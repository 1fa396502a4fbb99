//! # checkout-core
//!
//! Core types and traits for the Solen checkout backend.
//!
//! This crate provides:
//! - `PriceCatalog` mapping (product, size) to a provider price reference
//! - `CheckoutRequest` and `CartLine` for the two accepted request shapes
//! - `Order`, `LineItem`, and `CheckoutSession` for checkout flow
//! - `PaymentStrategy` trait for implementing payment providers
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{CheckoutRequest, Order, PriceCatalog, RequestShape};
//!
//! let catalog = PriceCatalog::builtin();
//! let request: CheckoutRequest = serde_json::from_str(body)?;
//!
//! // Validate before talking to the provider
//! let order = Order::from_request(&catalog, request, RequestShape::ItemsOrSingle)?;
//!
//! let session = strategy.create_checkout(&order, &urls.success_url(), &urls.cancel_url()).await?;
//! // Redirect user to session.checkout_url
//! ```

pub mod cart;
pub mod catalog;
pub mod error;
pub mod order;
pub mod strategy;

// Re-exports for convenience
pub use cart::{CartLine, CheckoutRequest, RequestShape};
pub use catalog::{PriceCatalog, SizePrices};
pub use error::{CheckoutError, CheckoutResult};
pub use order::{CheckoutSession, LineItem, Order};
pub use strategy::{BoxedPaymentStrategy, CheckoutUrls, PaymentStrategy};
