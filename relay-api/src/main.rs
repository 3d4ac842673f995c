//! Relay API server - contact-form relay with Turnstile verification.
//!
//! Receives contact-form submissions, verifies the Turnstile token, and
//! relays each submission as an email through the Resend API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use relay::{router, AppState, Config, ResendClient, TurnstileClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("relay_api_starting");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        port = config.port,
        verify_gate = config.verify_gate,
        contact_email = %config.contact_email,
        request_timeout_ms = ?config.request_timeout_ms,
        "config_loaded"
    );

    // One shared HTTP client for both upstream calls
    let mut builder = reqwest::Client::builder();
    if let Some(ms) = config.request_timeout_ms {
        builder = builder.timeout(Duration::from_millis(ms));
    }
    let http = builder.build().context("Failed to build HTTP client")?;

    let verifier = Arc::new(TurnstileClient::new(
        http.clone(),
        config.turnstile_secret_key.clone(),
    ));
    let mailer = Arc::new(ResendClient::new(http, config.resend_api_key.clone()));

    let port = config.port;
    let state = AppState::new(config, verifier, mailer);
    let app = router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "relay_api_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("relay_api_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("relay_api_shutting_down");
}
