//! # Request Handlers
//!
//! Axum request handlers for the checkout API.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use checkout_core::{CheckoutRequest, Order};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Body of the liveness response
pub const LIVENESS_MESSAGE: &str = "Solen backend is running ✅";

/// Create checkout response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckoutResponse {
    /// Checkout URL (redirect user here)
    pub url: String,
}

/// Liveness check
pub async fn health() -> &'static str {
    LIVENESS_MESSAGE
}

/// Validate the cart, then create a provider checkout session.
///
/// Nothing is sent to the provider unless every line maps to a catalog price.
#[instrument(skip(state, payload))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CreateCheckoutResponse>, ApiError> {
    let Json(request) = payload?;

    let order = Order::from_request(&state.catalog, request, state.config.request_shape)?;

    info!(
        "Creating checkout: {} line items, {} units, provider={}",
        order.line_items.len(),
        order.item_count(),
        state.strategy.provider_name()
    );

    let session = state
        .strategy
        .create_checkout(&order, &state.success_url(), &state.cancel_url())
        .await?;

    info!("Created checkout session: {}", session.session_id);

    Ok(Json(CreateCheckoutResponse {
        url: session.checkout_url,
    }))
}
