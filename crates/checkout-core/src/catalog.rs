//! # Price Catalog
//!
//! Maps a (product, size) pair to the provider price reference it is sold at.
//! The catalog is built once at startup, usually from `config/catalog.toml`,
//! and is read-only afterwards.
//!
//! ```toml
//! [products.white-sweatpants]
//! S = "price_1SSTdD6VqDaMUiptLNJ61G1p"
//! M = "price_1SSTfr6VqDaMUiptfHrrKGM9"
//! ```

use crate::error::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Size code -> provider price reference
pub type SizePrices = BTreeMap<String, String>;

/// Product catalog keyed by product id, then size code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceCatalog {
    #[serde(default)]
    products: BTreeMap<String, SizePrices>,
}

impl PriceCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog the storefront ships with
    pub fn builtin() -> Self {
        Self::new()
            .with_product(
                "white-sweatpants",
                [
                    ("S", "price_1SSTdD6VqDaMUiptLNJ61G1p"),
                    ("M", "price_1SSTfr6VqDaMUiptfHrrKGM9"),
                    ("L", "price_1SSTiC6VqDaMUiptdlnIXEnm"),
                ],
            )
            .with_product(
                "black-sweatpants",
                [
                    ("S", "price_1SSRfT6VqDaMUiptecql1O1w"),
                    ("M", "price_1SSTRj6VqDaMUiptfVyDtfZD"),
                    ("L", "price_1SSTVy6VqDaMUipt5Me5cnpB"),
                ],
            )
    }

    /// Builder: add a product with all of its sizes
    pub fn with_product<I, S, P>(mut self, product_id: impl Into<String>, sizes: I) -> Self
    where
        I: IntoIterator<Item = (S, P)>,
        S: Into<String>,
        P: Into<String>,
    {
        let entry = self.products.entry(product_id.into()).or_default();
        for (size, price_ref) in sizes {
            entry.insert(size.into(), price_ref.into());
        }
        self
    }

    /// Look up the price reference for a product and size.
    ///
    /// The product is checked first, so an unknown product with an unknown
    /// size reports `InvalidProduct`.
    pub fn price_for(&self, product_id: &str, size: &str) -> CheckoutResult<&str> {
        let sizes = self
            .products
            .get(product_id)
            .ok_or_else(|| CheckoutError::InvalidProduct {
                product: product_id.to_string(),
            })?;

        sizes
            .get(size)
            .map(String::as_str)
            .ok_or_else(|| CheckoutError::InvalidSize {
                product: product_id.to_string(),
                size: size.to_string(),
            })
    }

    /// Check if a product is sold at all
    pub fn contains_product(&self, product_id: &str) -> bool {
        self.products.contains_key(product_id)
    }

    /// Every (product, size, price reference) triple
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.products.iter().flat_map(|(product, sizes)| {
            sizes
                .iter()
                .map(move |(size, price)| (product.as_str(), size.as_str(), price.as_str()))
        })
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Reject catalogs that could never produce a valid checkout
    pub fn validate(&self) -> CheckoutResult<()> {
        if self.products.is_empty() {
            return Err(CheckoutError::Configuration(
                "price catalog has no products".to_string(),
            ));
        }

        for (product, sizes) in &self.products {
            if sizes.is_empty() {
                return Err(CheckoutError::Configuration(format!(
                    "product {} has no sizes",
                    product
                )));
            }
            if let Some((size, _)) = sizes.iter().find(|(_, price)| price.trim().is_empty()) {
                return Err(CheckoutError::Configuration(format!(
                    "product {} size {} has an empty price reference",
                    product, size
                )));
            }
        }

        Ok(())
    }

    /// Load and validate a catalog from a TOML string
    pub fn from_toml(toml_str: &str) -> CheckoutResult<Self> {
        let catalog: Self = toml::from_str(toml_str)
            .map_err(|e| CheckoutError::Configuration(format!("invalid catalog: {}", e)))?;
        catalog.validate()?;
        Ok(catalog)
    }
}
