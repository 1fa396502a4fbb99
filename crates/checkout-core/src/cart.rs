//! # Cart Request Types
//!
//! The storefront posts carts in two shapes:
//!
//! ```text
//! { "product": "white-sweatpants", "size": "M", "quantity": 2 }     single line
//! { "items": [ { "id": "black-sweatpants", "size": "S" }, ... ] }    item list
//! ```
//!
//! Fields are held as raw JSON values so that a wrong type becomes a
//! validation error for that field instead of a body parse failure.

use crate::error::{CheckoutError, CheckoutResult};
use serde::Deserialize;
use serde_json::Value;

/// Which request shapes the service accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestShape {
    /// Only `{ "items": [...] }`
    ItemsOnly,
    /// `{ "items": [...] }`, or a single line at the top level
    #[default]
    ItemsOrSingle,
}

impl RequestShape {
    /// Shape policy from the single-item compatibility flag
    pub fn from_flag(accept_single_item: bool) -> Self {
        if accept_single_item {
            RequestShape::ItemsOrSingle
        } else {
            RequestShape::ItemsOnly
        }
    }
}

/// One requested cart line, as sent by the frontend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartLine {
    /// Product identifier (`id` in the item-list shape)
    #[serde(default, alias = "id")]
    pub product: Option<Value>,
    /// Size code
    #[serde(default)]
    pub size: Option<Value>,
    /// Quantity, defaults to 1
    #[serde(default)]
    pub quantity: Option<Value>,
}

impl CartLine {
    /// Create a line from typed values
    pub fn new(product: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            product: Some(Value::String(product.into())),
            size: Some(Value::String(size.into())),
            quantity: None,
        }
    }

    /// Product id, if it was sent as a string
    pub fn product_id(&self) -> Option<&str> {
        self.product.as_ref().and_then(Value::as_str)
    }

    /// Size code, if it was sent as a string
    pub fn size_code(&self) -> Option<&str> {
        self.size.as_ref().and_then(Value::as_str)
    }

    /// Resolve the requested quantity.
    ///
    /// Absent or falsy values (`null`, `0`, `false`, `""`) mean 1.
    pub fn quantity(&self) -> CheckoutResult<u32> {
        let value = match &self.quantity {
            None | Some(Value::Null) | Some(Value::Bool(false)) => return Ok(1),
            Some(value) => value,
        };

        let invalid = || CheckoutError::InvalidQuantity {
            value: value.to_string(),
        };

        match value {
            Value::Number(n) => {
                if let Some(q) = n.as_u64() {
                    if q == 0 {
                        return Ok(1);
                    }
                    return u32::try_from(q).map_err(|_| invalid());
                }
                match n.as_f64() {
                    Some(f) if f == 0.0 => Ok(1),
                    Some(f) if f > 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => {
                        Ok(f as u32)
                    }
                    _ => Err(invalid()),
                }
            }
            Value::String(s) if s.is_empty() => Ok(1),
            Value::String(s) => match s.trim().parse::<u32>() {
                Ok(q) if q > 0 => Ok(q),
                _ => Err(invalid()),
            },
            _ => Err(invalid()),
        }
    }
}

/// Body of `POST /create-checkout-session`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutRequest {
    /// Item list (canonical shape)
    #[serde(default)]
    pub items: Option<Value>,

    /// Single-line shape fields
    #[serde(flatten)]
    pub line: CartLine,
}

impl CheckoutRequest {
    /// Extract the requested lines, in order.
    ///
    /// An `items` field that is present wins over top-level line fields. It
    /// must be a non-empty array. Entries that are not objects become empty
    /// lines and fail validation on their product. An object entry that does
    /// not parse (both `id` and `product` set) is a malformed body, as it is
    /// at the top level.
    pub fn into_lines(self, shape: RequestShape) -> CheckoutResult<Vec<CartLine>> {
        match self.items {
            Some(Value::Array(items)) if !items.is_empty() => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(_) => serde_json::from_value(item)
                        .map_err(|e| CheckoutError::InvalidRequest(e.to_string())),
                    _ => Ok(CartLine::default()),
                })
                .collect(),
            Some(_) => Err(CheckoutError::NoItems),
            None => match shape {
                RequestShape::ItemsOrSingle => Ok(vec![self.line]),
                RequestShape::ItemsOnly => Err(CheckoutError::NoItems),
            },
        }
    }
}
