// SPDX-FileCopyrightText: 2025 Mustofa Amami <amammustofa@gmail.com>
// SPDX-License-Identifier: MIT

//! Prometheus counters for the contact endpoint.

use lazy_static::lazy_static;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

lazy_static! {
    pub static ref SUBMISSIONS_RECEIVED: IntCounter = register_int_counter!(
        "contact_submissions_received_total",
        "Total contact form submissions received"
    )
    .unwrap();
    pub static ref SUBMISSIONS_ACCEPTED: IntCounter = register_int_counter!(
        "contact_submissions_accepted_total",
        "Submissions that passed validation"
    )
    .unwrap();
    pub static ref SUBMISSIONS_REJECTED: IntCounter = register_int_counter!(
        "contact_submissions_rejected_total",
        "Submissions rejected by validation"
    )
    .unwrap();
    pub static ref RATE_LIMITED: IntCounter = register_int_counter!(
        "contact_rate_limited_total",
        "Submissions rejected by the rate limiter"
    )
    .unwrap();
    pub static ref EMAILS_SENT: IntCounter = register_int_counter!(
        "contact_emails_sent_total",
        "Contact emails dispatched successfully"
    )
    .unwrap();
    pub static ref EMAIL_FAILURES: IntCounter = register_int_counter!(
        "contact_email_failures_total",
        "Contact email dispatch failures (logged, not surfaced)"
    )
    .unwrap();
}

/// Render all registered metrics in the Prometheus text format.
pub fn render() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if encoder.encode(&prometheus::gather(), &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
