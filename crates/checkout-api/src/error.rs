//! API error type with HTTP response mapping.
//!
//! Every error body is `{"error": "<message>"}`. Server-side failures are
//! logged with full detail and answered with a generic message.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use checkout_core::CheckoutError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Errors a handler can return
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("rejected request body: {0}")]
    Body(#[from] JsonRejection),
}

impl ApiError {
    fn into_checkout_error(self) -> CheckoutError {
        match self {
            ApiError::Checkout(err) => err,
            ApiError::Body(rejection) => CheckoutError::InvalidRequest(rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.into_checkout_error();

        if err.is_client_error() {
            debug!(error = %err, "rejected checkout request");
        } else {
            error!(error = %err, "❌ Error creating checkout session");
        }

        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::new(err.public_message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Log sink shared between the subscriber and the test
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn respond_with_logs(err: ApiError) -> (Response, String) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();

        let response = tracing::subscriber::with_default(subscriber, || err.into_response());
        (response, logs.contents())
    }

    async fn body_of(response: Response) -> ErrorResponse {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_response() {
        let response = ApiError::from(CheckoutError::InvalidSize {
            product: "white-sweatpants".into(),
            size: "XS".into(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(response).await, ErrorResponse::new("Invalid size"));
    }

    #[tokio::test]
    async fn test_provider_error_is_generic() {
        let response = ApiError::from(CheckoutError::ProviderError {
            provider: "stripe".into(),
            message: "Your card was declined".into(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_of(response).await,
            ErrorResponse::new("Internal server error")
        );
    }

    #[tokio::test]
    async fn test_provider_detail_is_logged_not_returned() {
        let (response, logs) = respond_with_logs(ApiError::from(CheckoutError::ProviderError {
            provider: "stripe".into(),
            message: "No such price: 'price_missing'".into(),
        }));

        assert!(logs.contains("ERROR"));
        assert!(logs.contains("No such price: 'price_missing'"));
        assert_eq!(
            body_of(response).await,
            ErrorResponse::new("Internal server error")
        );
    }

    #[test]
    fn test_client_error_logged_below_error_level() {
        let (response, logs) = respond_with_logs(ApiError::from(CheckoutError::NoItems));

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(logs.contains("DEBUG"));
        assert!(!logs.contains("ERROR"));
    }
}
