//! HTTP endpoint handlers.
//!
//! The contact handler does the full submission workflow in order:
//! honeypot check, field validation, Turnstile verification, email
//! composition, dispatch through Resend. Each upstream call happens once;
//! there are no retries. Every response is JSON `{success, error?}`.

use std::sync::Arc;

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::email::{contact_email_html, contact_email_text, MailSender, OutboundEmail};
use crate::turnstile::TokenVerifier;
use crate::web::form::{self, Submission};
use crate::web::BODY_LIMIT;
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub verifier: Arc<dyn TokenVerifier>,
    pub mailer: Arc<dyn MailSender>,
}

impl AppState {
    pub fn new(
        config: Config,
        verifier: Arc<dyn TokenVerifier>,
        mailer: Arc<dyn MailSender>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            verifier,
            mailer,
        }
    }
}

// =============================================================================
// JSON response envelope
// =============================================================================

/// Response body shared by every route: `{success, error?}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            error: Some(message.to_string()),
        }
    }

    /// Failure with no user-facing message; detail goes to the logs only.
    pub fn opaque_failure() -> Self {
        Self {
            success: false,
            error: None,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Contact Handler
// =============================================================================

/// Contact-form endpoint.
///
/// Order matters: the honeypot wins over validation so bots get a clean
/// 200 without any hint they were detected, and the email API is only
/// reached after the token verifies.
pub async fn contact(
    State(state): State<AppState>,
    request: Request,
) -> (StatusCode, Json<ApiResponse>) {
    let (parts, body) = request.into_parts();
    let content_type = header_str(&parts.headers, CONTENT_TYPE.as_str());
    let remote_ip = header_str(&parts.headers, "CF-Connecting-IP");

    let bytes = match to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "contact_body_unreadable");
            Default::default()
        }
    };

    // Undecodable bodies fall through as an all-empty submission and get
    // rejected by the required-field check.
    let submission = match form::parse_submission(content_type.as_deref(), &bytes).await {
        Ok(submission) => submission,
        Err(e) => {
            warn!(error = %e, "contact_form_undecodable");
            Submission::default()
        }
    };

    let name = submission.name.trim();
    let email = submission.email.trim();
    let message = submission.message.trim();

    info!(
        name_length = name.len(),
        email_length = email.len(),
        message_length = message.len(),
        has_token = !submission.token.is_empty(),
        "contact_received"
    );

    // Honeypot: answer success without processing so the bot thinks it worked.
    if !submission.website.is_empty() {
        info!("contact_honeypot_tripped");
        return (StatusCode::OK, Json(ApiResponse::ok()));
    }

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("All fields are required.")),
        );
    }

    if submission.token.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Turnstile verification missing.")),
        );
    }

    let outcome = match state
        .verifier
        .verify(&submission.token, remote_ip.as_deref())
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %e, "turnstile_verify_error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::opaque_failure()),
            );
        }
    };

    if !outcome.success {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Turnstile verification failed.")),
        );
    }

    let outbound = OutboundEmail {
        from: state.config.from_address.clone(),
        to: vec![state.config.contact_email.clone()],
        reply_to: email.to_string(),
        subject: format!("Contact form: {name}"),
        text: contact_email_text(name, email, message),
        html: contact_email_html(name, email, message, &state.config.site_name),
    };

    let dispatch = match state.mailer.send(&outbound).await {
        Ok(dispatch) => dispatch,
        Err(e) => {
            error!(error = %e, "resend_dispatch_error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::opaque_failure()),
            );
        }
    };

    if !dispatch.is_success() {
        error!(
            status = dispatch.status,
            body = %dispatch.body,
            "resend_dispatch_rejected"
        );
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(
                "Failed to send message. Please try again later.",
            )),
        );
    }

    info!("contact_relayed");

    (StatusCode::OK, Json(ApiResponse::ok()))
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}
