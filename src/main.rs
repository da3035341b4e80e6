// SPDX-FileCopyrightText: 2025 Mustofa Amami <amammustofa@gmail.com>
// SPDX-License-Identifier: MIT

//! Contact Form API Service
//!
//! A small HTTP service backing the portfolio site's contact page. Submissions
//! are rate limited per client IP, validated server-side, sanitized, and
//! forwarded by email to the site owner; when email is not configured the
//! composed message is logged instead.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `MAX_REQUESTS`: Max submissions per window per client (default: 5)
//! - `WINDOW_MINUTES`: Rate limit window in minutes (default: 15)
//! - `EMAIL_API_KEY`: Email provider API key; absent disables dispatch
//! - `FROM_EMAIL`: Overrides the default sender address
//! - `CONTACT_EMAIL`: Overrides the default recipient address

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use contact_api::{
    config::Config,
    handlers::{router, AppState},
    limiter::RateLimiter,
    mailer::HttpMailer,
    pipeline::ContactPipeline,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = load_config();
    info!(
        bind_addr = %config.bind_addr,
        max_requests = config.rate_limit.max_requests,
        window_minutes = config.rate_limit.window_minutes,
        email_configured = config.email.api_key.is_some(),
        "Starting contact form API"
    );

    // Create application state
    let limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));
    limiter.start_cleanup();

    let mailer = HttpMailer::from_config(&config.email);
    let pipeline = ContactPipeline::new(mailer, &config.email);

    let state = Arc::new(AppState {
        limiter: Arc::clone(&limiter),
        pipeline,
        config: config.clone(),
    });

    let app = router(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // Stop the cleanup timer so shutdown does not leak the task.
    limiter.shutdown();
    info!("Shut down cleanly");

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        return;
    }
    info!("Shutdown signal received");
}

/// Load configuration from environment variables.
fn load_config() -> Config {
    let mut config = Config {
        bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        ..Default::default()
    };

    if let Some(max_requests) = std::env::var("MAX_REQUESTS")
        .ok()
        .and_then(|v| v.parse().ok())
    {
        config.rate_limit.max_requests = max_requests;
    }
    if let Some(window_minutes) = std::env::var("WINDOW_MINUTES")
        .ok()
        .and_then(|v| v.parse().ok())
    {
        config.rate_limit.window_minutes = window_minutes;
    }

    config.email.api_key = std::env::var("EMAIL_API_KEY").ok().filter(|v| !v.is_empty());
    if let Ok(from) = std::env::var("FROM_EMAIL") {
        if !from.is_empty() {
            config.email.from_address = from;
        }
    }
    if let Ok(to) = std::env::var("CONTACT_EMAIL") {
        if !to.is_empty() {
            config.email.to_address = to;
        }
    }

    config
}
