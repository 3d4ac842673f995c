//! Configuration module for environment variable parsing.
//!
//! Reads all configuration from environment variables once at startup;
//! the resulting struct is handed to the handlers, never looked up again.

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Turnstile secret key used against the siteverify endpoint
    pub turnstile_secret_key: String,

    /// Resend API key (bearer token)
    pub resend_api_key: String,

    /// Destination address for contact-form notifications
    pub contact_email: String,

    /// Sender address for outbound notifications
    pub from_address: String,

    /// Site label used in the email footer branding line
    pub site_name: String,

    /// Whether to mount the verification gate middleware on /api/*
    pub verify_gate: bool,

    /// Optional HTTP client timeout in milliseconds; unset means no timeout
    pub request_timeout_ms: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// The three secrets have no defaults; startup fails without them.
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            turnstile_secret_key: env::var("TURNSTILE_SECRET_KEY")
                .context("TURNSTILE_SECRET_KEY is required")?,

            resend_api_key: env::var("RESEND_API_KEY").context("RESEND_API_KEY is required")?,

            contact_email: env::var("CONTACT_EMAIL").context("CONTACT_EMAIL is required")?,

            from_address: env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "Contact Form <noreply@bojan.delic.rs>".to_string()),

            site_name: env::var("SITE_NAME").unwrap_or_else(|_| "bojan.delic.rs".to_string()),

            verify_gate: env::var("VERIFY_GATE")
                .ok()
                .map(|v| parse_bool(&v))
                .unwrap_or(false),

            request_timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok()),
        })
    }
}

/// Parse a boolean-ish environment value ("1", "true", "yes" are true).
fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}
