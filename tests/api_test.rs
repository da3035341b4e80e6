// SPDX-FileCopyrightText: 2025 Mustofa Amami <amammustofa@gmail.com>
// SPDX-License-Identifier: MIT

//! HTTP contract tests for the contact endpoint.
//!
//! Each test builds its own router with a fresh limiter and no email sender
//! configured, so nothing here touches the network.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use contact_api::{
    config::Config,
    handlers::{router, AppState},
    limiter::RateLimiter,
    pipeline::ContactPipeline,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app(max_requests: u32) -> Router {
    let mut config = Config::default();
    config.rate_limit.max_requests = max_requests;

    let limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));
    let pipeline = ContactPipeline::new(None, &config.email);

    router(Arc::new(AppState {
        limiter,
        pipeline,
        config,
    }))
}

fn contact_request(body: &str, client_ip: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", client_ip)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn valid_payload() -> String {
    json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "subject": "Project Inquiry",
        "message": "I would like to discuss a potential project."
    })
    .to_string()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn valid_submission_returns_200_with_confirmation() {
    let app = test_app(5);

    let response = app
        .oneshot(contact_request(&valid_payload(), "203.0.113.1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(
        body["message"],
        "Your message has been sent successfully! I'll get back to you soon."
    );
}

#[tokio::test]
async fn invalid_email_returns_400_with_specific_message() {
    let app = test_app(5);
    let payload = json!({
        "name": "Jane Doe",
        "email": "not-an-email",
        "subject": "Project Inquiry",
        "message": "I would like to discuss a potential project."
    })
    .to_string();

    let response = app
        .oneshot(contact_request(&payload, "203.0.113.2"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid email format");
}

#[tokio::test]
async fn short_message_returns_400_with_specific_message() {
    let app = test_app(5);
    let payload = json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "subject": "Project Inquiry",
        "message": "short"
    })
    .to_string();

    let response = app
        .oneshot(contact_request(&payload, "203.0.113.3"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Message must be at least 10 characters long");
}

#[tokio::test]
async fn absent_field_returns_all_fields_required() {
    let app = test_app(5);
    // No "name" at all: decodes to an empty field, not a parse failure.
    let payload = json!({
        "email": "jane@example.com",
        "subject": "Project Inquiry",
        "message": "I would like to discuss a potential project."
    })
    .to_string();

    let response = app
        .oneshot(contact_request(&payload, "203.0.113.4"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "All fields are required");
}

#[tokio::test]
async fn malformed_body_returns_500_with_generic_message() {
    let app = test_app(5);

    let response = app
        .oneshot(contact_request("{not json", "203.0.113.5"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "An error occurred while sending your message. Please try again later."
    );
}

#[tokio::test]
async fn rate_limit_returns_429_with_retry_after() {
    let app = test_app(2);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(contact_request(&valid_payload(), "203.0.113.6"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(contact_request(&valid_payload(), "203.0.113.6"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after = response
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .expect("429 must carry Retry-After");
    assert!(retry_after > 0);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Too many requests. Please try again later.");

    // A different client is unaffected.
    let response = app
        .oneshot(contact_request(&valid_payload(), "203.0.113.7"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn rate_limit_counts_invalid_submissions_too() {
    // The limiter runs before validation, so garbage costs budget as well.
    let app = test_app(1);

    let response = app
        .clone()
        .oneshot(contact_request("{not json", "203.0.113.8"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = app
        .oneshot(contact_request(&valid_payload(), "203.0.113.8"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn health_endpoint_reports_service_identity() {
    let app = test_app(5);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "contact-api");
}

#[tokio::test]
async fn metrics_endpoint_serves_prometheus_text() {
    let app = test_app(5);

    // Generate at least one observation first.
    let _ = app
        .clone()
        .oneshot(contact_request(&valid_payload(), "203.0.113.9"))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("contact_submissions_received_total"));
}
