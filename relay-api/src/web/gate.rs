//! Verification gate middleware.
//!
//! Mounted in front of `/api/*` routes when `VERIFY_GATE` is enabled. The
//! body has to be buffered to get at the token, then is re-attached so the
//! downstream handler sees the request unmodified. Any ambiguity (missing
//! token, undecodable body, verifier transport failure) short-circuits to a
//! rejection; the gate never fails open.

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info, warn};

use crate::web::form;
use crate::web::handlers::{ApiResponse, AppState};
use crate::web::BODY_LIMIT;

pub async fn verify_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let content_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    let remote_ip = parts
        .headers
        .get("CF-Connecting-IP")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    let bytes = match to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "gate_body_unreadable");
            return missing_token_response();
        }
    };

    let token = match form::extract_token(content_type.as_deref(), &bytes).await {
        Some(token) => token,
        None => {
            info!("gate_token_missing");
            return missing_token_response();
        }
    };

    let outcome = match state.verifier.verify(&token, remote_ip.as_deref()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %e, "gate_verify_error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::opaque_failure()),
            )
                .into_response();
        }
    };

    if !outcome.success {
        info!("gate_rejected");
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Turnstile verification failed.")),
        )
            .into_response();
    }

    // Forward the request with the buffered body re-attached.
    let request = Request::from_parts(parts, Body::from(bytes));
    next.run(request).await
}

fn missing_token_response() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error("Turnstile verification missing.")),
    )
        .into_response()
}
