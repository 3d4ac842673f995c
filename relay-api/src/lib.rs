//! Relay - contact-form relay service.
//!
//! This library backs the `relay-api` binary, a small HTTP service that:
//! - Verifies Cloudflare Turnstile tokens submitted with a contact form
//! - Drops bot traffic caught by a honeypot field
//! - Relays legitimate submissions as email via the Resend API
//!
//! ## Architecture
//!
//! ```text
//! Form POST → Verification Gate (optional) → Contact Handler → Resend → JSON response
//! ```

pub mod config;
pub mod email;
pub mod turnstile;
pub mod web;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use email::{DispatchResult, MailSender, OutboundEmail, ResendClient};
pub use turnstile::{TokenVerifier, TurnstileClient, VerificationOutcome};
pub use web::{router, AppState};
