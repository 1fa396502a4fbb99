//! # Routes
//!
//! Axum router configuration for the checkout API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Create the main application router
///
/// Routes:
///   - GET  /                          - Liveness
///   - GET  /health                    - Liveness
///   - POST /create-checkout-session   - Create checkout session
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(state.config.frontend_url.as_deref());

    Router::new()
        .route("/", get(handlers::health))
        .route("/health", get(handlers::health))
        .route(
            "/create-checkout-session",
            post(handlers::create_checkout_session),
        )
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}

/// CORS for the storefront: its exact origin when configured, else any origin
pub fn cors_layer(frontend_url: Option<&str>) -> CorsLayer {
    let origin = match frontend_url {
        Some(url) => match HeaderValue::from_str(url.trim_end_matches('/')) {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                warn!("FRONTEND_URL is not a valid origin, allowing any origin");
                AllowOrigin::any()
            }
        },
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppConfig;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use checkout_core::{
        CheckoutError, CheckoutResult, CheckoutSession, Order, PaymentStrategy, PriceCatalog,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    struct Unreachable;

    #[async_trait]
    impl PaymentStrategy for Unreachable {
        async fn create_checkout(
            &self,
            _order: &Order,
            _success_url: &str,
            _cancel_url: &str,
        ) -> CheckoutResult<CheckoutSession> {
            Err(CheckoutError::Internal("not used".into()))
        }

        fn provider_name(&self) -> &'static str {
            "unreachable"
        }
    }

    fn router(frontend_url: Option<&str>) -> Router {
        let config = AppConfig {
            frontend_url: frontend_url.map(String::from),
            ..AppConfig::default()
        };
        create_router(AppState::with_strategy(
            config,
            PriceCatalog::builtin(),
            Arc::new(Unreachable),
        ))
    }

    fn preflight() -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/create-checkout-session")
            .header(header::ORIGIN, "https://solen.shop")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_cors_any_origin_without_frontend_url() {
        let response = router(None).oneshot(preflight()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_exact_frontend_origin() {
        let response = router(Some("https://solen.shop/"))
            .oneshot(preflight())
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://solen.shop"
        );
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = router(None)
            .oneshot(Request::builder().uri("/checkout").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
