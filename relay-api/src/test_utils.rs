//! Shared helpers for the handler and gate tests: mock upstream clients
//! with call counters, a canned config, and oneshot request plumbing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::email::{DispatchResult, MailSender, OutboundEmail};
use crate::turnstile::{TokenVerifier, VerificationOutcome};
use crate::web::{router, AppState};
use crate::Config;

pub const URLENCODED: &str = "application/x-www-form-urlencoded";

pub fn test_config(verify_gate: bool) -> Config {
    Config {
        port: 0,
        turnstile_secret_key: "test-secret".to_string(),
        resend_api_key: "test-key".to_string(),
        contact_email: "owner@example.com".to_string(),
        from_address: "Contact Form <noreply@example.com>".to_string(),
        site_name: "example.com".to_string(),
        verify_gate,
        request_timeout_ms: None,
    }
}

/// Verifier double: fixed outcome, counts calls, optionally errors.
pub struct MockVerifier {
    success: bool,
    fail_transport: bool,
    calls: AtomicUsize,
}

impl MockVerifier {
    pub fn new(success: bool) -> Self {
        Self {
            success,
            fail_transport: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// A verifier whose transport always fails.
    pub fn failing() -> Self {
        Self {
            success: false,
            fail_transport: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenVerifier for MockVerifier {
    async fn verify(&self, _token: &str, _remote_ip: Option<&str>) -> Result<VerificationOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_transport {
            return Err(anyhow!("siteverify unreachable"));
        }

        Ok(VerificationOutcome {
            success: self.success,
            error_codes: vec![],
        })
    }
}

/// Mailer double: fixed response status, records the last email.
pub struct MockMailer {
    status: u16,
    calls: AtomicUsize,
    last_email: Mutex<Option<OutboundEmail>>,
}

impl MockMailer {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            calls: AtomicUsize::new(0),
            last_email: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_email(&self) -> Option<OutboundEmail> {
        self.last_email.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailSender for MockMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<DispatchResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_email.lock().unwrap() = Some(email.clone());

        Ok(DispatchResult {
            status: self.status,
            body: "{}".to_string(),
        })
    }
}

/// Router with the given mocks already wired in.
pub fn router_with(
    verifier: Arc<MockVerifier>,
    mailer: Arc<MockMailer>,
    verify_gate: bool,
) -> Router {
    let state = AppState::new(test_config(verify_gate), verifier, mailer);
    router(state)
}

/// Router plus handles to its mocks.
pub fn test_router(
    verifier_success: bool,
    mail_status: u16,
    verify_gate: bool,
) -> (Router, Arc<MockVerifier>, Arc<MockMailer>) {
    let verifier = Arc::new(MockVerifier::new(verifier_success));
    let mailer = Arc::new(MockMailer::new(mail_status));
    let app = router_with(verifier.clone(), mailer.clone(), verify_gate);
    (app, verifier, mailer)
}

/// POST a form body to `/api/contact` and return the raw response.
pub async fn post_form(app: Router, content_type: &str, body: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();

    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
