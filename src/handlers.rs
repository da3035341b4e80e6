// SPDX-FileCopyrightText: 2025 Mustofa Amami <amammustofa@gmail.com>
// SPDX-License-Identifier: MIT

//! HTTP handlers for the contact form API.
//!
//! The handler owns everything the core does not: extracting a stable client
//! identifier, translating rate limit decisions into 429 responses, and
//! mapping pipeline results onto the JSON contract the site's form expects.

use crate::config::Config;
use crate::limiter::{RateLimitDecision, RateLimiter};
use crate::mailer::HttpMailer;
use crate::metrics;
use crate::pipeline::ContactPipeline;
use crate::validator::ContactForm;
use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Generic message for anything that is not a validation failure.
pub const GENERIC_ERROR_MESSAGE: &str =
    "An error occurred while sending your message. Please try again later.";

/// Message returned with a 429.
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests. Please try again later.";

/// Shared application state.
pub struct AppState {
    pub limiter: Arc<RateLimiter>,
    pub pipeline: ContactPipeline<HttpMailer>,
    pub config: Config,
}

/// Success response body.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/contact", post(contact))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "contact-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Prometheus metrics endpoint.
pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::render(),
    )
}

/// Handle one contact form submission.
pub async fn contact(
    State(state): State<Arc<AppState>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Response {
    metrics::SUBMISSIONS_RECEIVED.inc();

    let identifier = client_identifier(&headers, connect_info.map(|ConnectInfo(addr)| addr));

    // Rate limit before doing any work on the payload.
    let decision = state.limiter.check_limit(&identifier).await;
    if let RateLimitDecision::Limited { .. } = decision {
        let retry_after = decision.retry_after_secs(Utc::now().timestamp_millis());
        warn!(identifier = %identifier, retry_after, "Contact submission rate limited");
        metrics::RATE_LIMITED.inc();
        return (
            StatusCode::TOO_MANY_REQUESTS,
            [(header::RETRY_AFTER, retry_after.to_string())],
            Json(ErrorResponse {
                error: RATE_LIMIT_MESSAGE.to_string(),
            }),
        )
            .into_response();
    }

    // A body that does not decode is the one genuinely unexpected failure.
    let form = match payload {
        Ok(Json(form)) => form,
        Err(rejection) => {
            warn!(identifier = %identifier, error = %rejection, "Malformed contact payload");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: GENERIC_ERROR_MESSAGE.to_string(),
                }),
            )
                .into_response();
        }
    };

    match state.pipeline.submit(&form).await {
        Ok(submitted) => {
            info!(identifier = %identifier, outcome = ?submitted.outcome, "Contact submission accepted");
            metrics::SUBMISSIONS_ACCEPTED.inc();
            (
                StatusCode::OK,
                Json(SuccessResponse {
                    success: true,
                    message: submitted.message.to_string(),
                }),
            )
                .into_response()
        }
        Err(validation_error) => {
            info!(identifier = %identifier, error = %validation_error, "Contact submission rejected");
            metrics::SUBMISSIONS_REJECTED.inc();
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: validation_error.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Extract a stable per-client identifier.
///
/// Behind a proxy the first `X-Forwarded-For` hop is the client; otherwise
/// fall back to the socket peer address.
fn client_identifier(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return forwarded.to_string();
    }

    match peer {
        Some(addr) => addr.ip().to_string(),
        None => "unknown".to_string(),
    }
}
