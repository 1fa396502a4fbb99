//! # Order Types
//!
//! Validated orders and the checkout sessions created for them.

use crate::cart::{CartLine, CheckoutRequest, RequestShape};
use crate::catalog::PriceCatalog;
use crate::error::{CheckoutError, CheckoutResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A line item in an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product ID
    pub product_id: String,

    /// Size code
    pub size: String,

    /// Provider price reference
    pub price: String,

    /// Quantity, at least 1
    pub quantity: u32,
}

impl LineItem {
    /// Resolve a requested cart line against the catalog.
    ///
    /// Checks product, then size, then quantity; the first failure is returned.
    pub fn resolve(catalog: &PriceCatalog, line: &CartLine) -> CheckoutResult<Self> {
        let product_id = line.product_id().ok_or_else(|| CheckoutError::InvalidProduct {
            product: line
                .product
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_default(),
        })?;

        if !catalog.contains_product(product_id) {
            return Err(CheckoutError::InvalidProduct {
                product: product_id.to_string(),
            });
        }

        let size = line.size_code().ok_or_else(|| CheckoutError::InvalidSize {
            product: product_id.to_string(),
            size: line.size.as_ref().map(|v| v.to_string()).unwrap_or_default(),
        })?;

        let price = catalog.price_for(product_id, size)?;
        let quantity = line.quantity()?;

        Ok(Self {
            product_id: product_id.to_string(),
            size: size.to_string(),
            price: price.to_string(),
            quantity,
        })
    }
}

/// An order to be checked out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Line items, in request order
    pub line_items: Vec<LineItem>,
}

impl Order {
    /// Validate every line and build the order.
    ///
    /// All-or-nothing: the first invalid line aborts.
    pub fn from_lines(catalog: &PriceCatalog, lines: &[CartLine]) -> CheckoutResult<Self> {
        if lines.is_empty() {
            return Err(CheckoutError::NoItems);
        }

        let line_items = lines
            .iter()
            .map(|line| LineItem::resolve(catalog, line))
            .collect::<CheckoutResult<Vec<_>>>()?;

        Ok(Self { line_items })
    }

    /// Validate a request body of either accepted shape
    pub fn from_request(
        catalog: &PriceCatalog,
        request: CheckoutRequest,
        shape: RequestShape,
    ) -> CheckoutResult<Self> {
        let lines = request.into_lines(shape)?;
        Self::from_lines(catalog, &lines)
    }

    /// Check if order is empty
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Get item count
    pub fn item_count(&self) -> u32 {
        self.line_items.iter().map(|i| i.quantity).sum()
    }
}

/// A checkout session created by a payment provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID
    pub session_id: String,

    /// Provider name (e.g., "stripe")
    pub provider: String,

    /// URL to redirect customer to for payment
    pub checkout_url: String,

    /// When the session expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl CheckoutSession {
    /// Create a new checkout session
    pub fn new(
        session_id: impl Into<String>,
        provider: impl Into<String>,
        checkout_url: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            provider: provider.into(),
            checkout_url: checkout_url.into(),
            expires_at: None,
            created_at: Utc::now(),
        }
    }
}
