//! # Solen Checkout
//!
//! Creates Stripe Checkout Sessions for the Solen storefront.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export FRONTEND_URL=https://solen.shop
//!
//! # Run the server
//! solen-checkout
//! ```

use checkout_api::{routes, AppConfig, AppState, LogFormat};
use tracing::{error, info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    init_tracing(config.log_format);

    // Without a Stripe key the process must not start
    let state = AppState::new(config).map_err(|e| {
        error!("❌ Startup failed: {:#}", e);
        e
    })?;

    let addr = state.config.socket_addr()?;

    info!("Environment: {}", state.config.environment);
    info!("Products loaded: {}", state.catalog.len());
    info!("Payment provider: {}", state.strategy.provider_name());

    match state.config.frontend_url.as_deref() {
        Some(url) => info!("CORS origin and redirects: {}", url),
        None => warn!(
            "FRONTEND_URL not set: allowing any origin, redirecting to {}",
            state.urls.base_url
        ),
    }

    if !state.config.is_production() {
        info!("Success URL: {}", state.success_url());
        info!("Cancel URL: {}", state.cancel_url());
    }

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("✅ Server running on port {}", addr.port());

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}
