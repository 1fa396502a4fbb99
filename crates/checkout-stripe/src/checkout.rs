//! # Stripe Checkout Sessions
//!
//! Implementation of Stripe Checkout Sessions API using catalog price IDs.

use crate::config::StripeConfig;
use async_trait::async_trait;
use checkout_core::{CheckoutError, CheckoutResult, CheckoutSession, Order, PaymentStrategy};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "stripe";

/// Stripe Checkout Session strategy
///
/// Uses Stripe's hosted checkout page. Each line item references a
/// pre-created Stripe Price, so amounts never come from the request.
pub struct StripeCheckoutStrategy {
    config: StripeConfig,
    client: Client,
}

impl StripeCheckoutStrategy {
    /// Create a new Stripe checkout strategy
    pub fn new(config: StripeConfig) -> CheckoutResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| CheckoutError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(config, client))
    }

    /// Create with an existing HTTP client
    pub fn with_client(config: StripeConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Form fields for `POST /v1/checkout/sessions`
    fn form_params(order: &Order, success_url: &str, cancel_url: &str) -> Vec<(String, String)> {
        let mut form_params: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), success_url.to_string()),
            ("cancel_url".to_string(), cancel_url.to_string()),
        ];

        for (i, item) in order.line_items.iter().enumerate() {
            form_params.push((format!("line_items[{}][price]", i), item.price.clone()));
            form_params.push((
                format!("line_items[{}][quantity]", i),
                item.quantity.to_string(),
            ));
        }

        form_params
    }
}

#[async_trait]
impl PaymentStrategy for StripeCheckoutStrategy {
    #[instrument(skip(self, order), fields(items = order.line_items.len()))]
    async fn create_checkout(
        &self,
        order: &Order,
        success_url: &str,
        cancel_url: &str,
    ) -> CheckoutResult<CheckoutSession> {
        if order.is_empty() {
            return Err(CheckoutError::InvalidRequest(
                "Order has no items".to_string(),
            ));
        }

        let form_params = Self::form_params(order, success_url, cancel_url);

        debug!(
            "Creating Stripe checkout session: {} line items, {} units",
            order.line_items.len(),
            order.item_count()
        );

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| CheckoutError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(CheckoutError::ProviderError {
                    provider: PROVIDER.to_string(),
                    message: error_response.error.describe(),
                });
            }

            return Err(CheckoutError::ProviderError {
                provider: PROVIDER.to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let session_response: StripeCheckoutSessionResponse =
            serde_json::from_str(&body).map_err(|e| {
                CheckoutError::Serialization(format!(
                    "Failed to parse Stripe response: {}",
                    e
                ))
            })?;

        let checkout_url = session_response.url.ok_or_else(|| CheckoutError::ProviderError {
            provider: PROVIDER.to_string(),
            message: format!("session {} has no redirect url", session_response.id),
        })?;

        info!(
            "Created Stripe checkout session: id={}, url={}",
            session_response.id, checkout_url
        );

        Ok(CheckoutSession {
            session_id: session_response.id,
            provider: PROVIDER.to_string(),
            checkout_url,
            expires_at: session_response
                .expires_at
                .and_then(|ts| DateTime::from_timestamp(ts, 0)),
            created_at: Utc::now(),
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    param: Option<String>,
}

impl StripeError {
    fn describe(&self) -> String {
        let mut out = self
            .message
            .clone()
            .unwrap_or_else(|| "unknown Stripe error".to_string());
        if let Some(ref error_type) = self.error_type {
            out.push_str(&format!(" (type={})", error_type));
        }
        if let Some(ref code) = self.code {
            out.push_str(&format!(" (code={})", code));
        }
        if let Some(ref param) = self.param {
            out.push_str(&format!(" (param={})", param));
        }
        out
    }
}
