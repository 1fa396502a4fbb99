//! # checkout-api
//!
//! HTTP API layer for the Solen checkout backend.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Liveness |
//! | GET | `/health` | Liveness |
//! | POST | `/create-checkout-session` | Create checkout session, returns `{ "url" }` |

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
pub use state::{AppConfig, AppState, LogFormat};
