//! Turnstile token verification.
//!
//! This module is the core of the verification gate: a token extracted from
//! form data is relayed to Cloudflare's siteverify endpoint together with the
//! shared secret, and the returned success flag decides whether the request
//! may proceed. The gate middleware and the contact handler both verify
//! through the [`TokenVerifier`] trait, so the transport (real siteverify
//! call vs. a test double) is a swappable detail.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

/// Cloudflare Turnstile siteverify endpoint.
pub const SITEVERIFY_URL: &str = "https://challenges.cloudflare.com/turnstile/v0/siteverify";

/// Outcome reported by the siteverify endpoint.
///
/// The endpoint returns more fields (hostname, challenge timestamp); only
/// the success flag and error codes matter here.
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationOutcome {
    pub success: bool,
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}

/// Verifies a Turnstile token against the siteverify endpoint.
///
/// A transport-level failure (endpoint unreachable, malformed JSON) is an
/// `Err`; callers treat it as an opaque internal failure, never as a pass.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str, remote_ip: Option<&str>) -> Result<VerificationOutcome>;
}

/// Real siteverify client.
#[derive(Clone)]
pub struct TurnstileClient {
    http: Client,
    secret: String,
    endpoint: String,
}

impl TurnstileClient {
    pub fn new(http: Client, secret: String) -> Self {
        Self {
            http,
            secret,
            endpoint: SITEVERIFY_URL.to_string(),
        }
    }
}

#[async_trait]
impl TokenVerifier for TurnstileClient {
    async fn verify(&self, token: &str, remote_ip: Option<&str>) -> Result<VerificationOutcome> {
        let mut params = vec![("secret", self.secret.as_str()), ("response", token)];
        if let Some(ip) = remote_ip {
            params.push(("remoteip", ip));
        }

        let response = self
            .http
            .post(&self.endpoint)
            .form(&params)
            .send()
            .await
            .context("siteverify request failed")?;

        let outcome: VerificationOutcome = response
            .json()
            .await
            .context("siteverify returned malformed JSON")?;

        info!(
            success = outcome.success,
            error_codes = ?outcome.error_codes,
            "turnstile_result"
        );

        Ok(outcome)
    }
}
