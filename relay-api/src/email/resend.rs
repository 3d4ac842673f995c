//! Email dispatch through the Resend API.
//!
//! One POST per submission, bearer-authenticated, no retries. The response
//! status and body are surfaced to the caller as a [`DispatchResult`] so the
//! handler can log them; they are never exposed to the client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

/// Resend email-sending endpoint.
pub const RESEND_URL: &str = "https://api.resend.com/emails";

/// Outbound notification email, shaped for the Resend API.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Status and body returned by the email endpoint.
#[derive(Debug, Clone)]
pub struct DispatchResult {
    pub status: u16,
    pub body: String,
}

impl DispatchResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a composed email through a transactional-email API.
///
/// An `Err` is a transport-level failure; a delivered-but-rejected dispatch
/// comes back as `Ok` with a non-2xx status.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<DispatchResult>;
}

/// Real Resend client.
#[derive(Clone)]
pub struct ResendClient {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl ResendClient {
    pub fn new(http: Client, api_key: String) -> Self {
        Self {
            http,
            api_key,
            endpoint: RESEND_URL.to_string(),
        }
    }
}

#[async_trait]
impl MailSender for ResendClient {
    async fn send(&self, email: &OutboundEmail) -> Result<DispatchResult> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await
            .context("resend request failed")?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .context("resend response body unreadable")?;

        info!(status = status, body = %body, "resend_response");

        Ok(DispatchResult { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_email_serializes_for_resend() {
        let email = OutboundEmail {
            from: "Contact Form <noreply@example.com>".to_string(),
            to: vec!["owner@example.com".to_string()],
            reply_to: "visitor@example.com".to_string(),
            subject: "Contact form: Ada".to_string(),
            text: "hello".to_string(),
            html: "<p>hello</p>".to_string(),
        };

        let json = serde_json::to_value(&email).unwrap();

        assert_eq!(json["to"], serde_json::json!(["owner@example.com"]));
        assert_eq!(json["reply_to"], "visitor@example.com");
        assert_eq!(json["subject"], "Contact form: Ada");
    }

    #[test]
    fn test_dispatch_result_success_range() {
        assert!(DispatchResult { status: 200, body: String::new() }.is_success());
        assert!(DispatchResult { status: 201, body: String::new() }.is_success());
        assert!(!DispatchResult { status: 301, body: String::new() }.is_success());
        assert!(!DispatchResult { status: 422, body: String::new() }.is_success());
        assert!(!DispatchResult { status: 500, body: String::new() }.is_success());
    }
}
