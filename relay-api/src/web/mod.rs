//! Web server module.
//!
//! Routes:
//! - `POST /api/contact` — the contact handler
//! - `GET /health` — liveness check
//!
//! When `Config::verify_gate` is set, the verification gate middleware is
//! mounted on the `/api` subtree and checks the Turnstile token before any
//! handler runs.

pub mod form;
pub mod gate;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{contact, health, ApiResponse, AppState, HealthResponse};

/// Cap on buffered form bodies; larger requests are treated as token-missing.
pub const BODY_LIMIT: usize = 256 * 1024;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let mut api = Router::new().route("/contact", post(contact));

    if state.config.verify_gate {
        api = api.route_layer(middleware::from_fn_with_state(
            state.clone(),
            gate::verify_gate,
        ));
    }

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
