//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the payment strategy, configuration, and price catalog.

use anyhow::Context;
use checkout_core::{BoxedPaymentStrategy, CheckoutUrls, PriceCatalog, RequestShape};
use checkout_stripe::{StripeCheckoutStrategy, StripeConfig};
use std::net::SocketAddr;
use std::sync::Arc;

/// Redirect base used when `FRONTEND_URL` is not set
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

const CATALOG_SEARCH_PATHS: [&str; 3] = [
    "config/catalog.toml",
    "../config/catalog.toml",
    "../../config/catalog.toml",
];

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Storefront origin; CORS allow-origin and redirect base
    pub frontend_url: Option<String>,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Explicit price catalog file
    pub catalog_path: Option<String>,
    /// Accepted request body shapes
    pub request_shape: RequestShape,
    /// Log output format
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; unset and blank values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: var("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            frontend_url: var("FRONTEND_URL"),
            environment: var("ENVIRONMENT").unwrap_or(defaults.environment),
            catalog_path: var("CATALOG_PATH"),
            request_shape: RequestShape::from_flag(
                var("CHECKOUT_ACCEPT_SINGLE_ITEM")
                    .and_then(|v| parse_flag(&v))
                    .unwrap_or(true),
            ),
            log_format: match var("LOG_FORMAT").as_deref() {
                Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }

    /// Base URL the success/cancel redirects are built on
    pub fn redirect_base(&self) -> &str {
        self.frontend_url.as_deref().unwrap_or(DEFAULT_FRONTEND_URL)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 10000,
            frontend_url: None,
            environment: "development".to_string(),
            catalog_path: None,
            request_shape: RequestShape::ItemsOrSingle,
            log_format: LogFormat::Text,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment provider
    pub strategy: BoxedPaymentStrategy,
    /// Price catalog, read-only after startup
    pub catalog: Arc<PriceCatalog>,
    /// Checkout redirect URLs
    pub urls: CheckoutUrls,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with the Stripe strategy.
    ///
    /// Fails if `STRIPE_SECRET_KEY` is missing or the catalog cannot be loaded.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        Self::from_lookup(config, |key| std::env::var(key).ok())
    }

    /// Create with the Stripe strategy, reading its settings from `lookup`
    pub fn from_lookup(
        config: AppConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let catalog = load_price_catalog(config.catalog_path.as_deref())?;

        let stripe_config = StripeConfig::from_lookup(lookup)
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;
        tracing::info!("Stripe mode: {}", stripe_config.mode());

        let stripe_strategy = StripeCheckoutStrategy::new(stripe_config)
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self::with_strategy(
            config,
            catalog,
            Arc::new(stripe_strategy) as BoxedPaymentStrategy,
        ))
    }

    /// Assemble state from explicit parts
    pub fn with_strategy(
        config: AppConfig,
        catalog: PriceCatalog,
        strategy: BoxedPaymentStrategy,
    ) -> Self {
        let urls = CheckoutUrls::new(config.redirect_base());

        Self {
            strategy,
            catalog: Arc::new(catalog),
            urls,
            config,
        }
    }

    /// Get success URL
    pub fn success_url(&self) -> String {
        self.urls.success_url()
    }

    /// Get cancel URL
    pub fn cancel_url(&self) -> String {
        self.urls.cancel_url()
    }
}

/// Load the price catalog.
///
/// An explicit path must exist. Without one, the first default location that
/// exists is used, then the built-in catalog.
pub fn load_price_catalog(path: Option<&str>) -> anyhow::Result<PriceCatalog> {
    if let Some(path) = path {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path))?;
        let catalog = PriceCatalog::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", path))?;
        tracing::info!("Loaded {} products from {}", catalog.len(), path);
        return Ok(catalog);
    }

    for path in CATALOG_SEARCH_PATHS {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = PriceCatalog::from_toml(&content)
                .with_context(|| format!("Failed to parse {}", path))?;
            tracing::info!("Loaded {} products from {}", catalog.len(), path);
            return Ok(catalog);
        }
    }

    tracing::info!("No catalog file found, using built-in catalog");
    Ok(PriceCatalog::builtin())
}
