// SPDX-FileCopyrightText: 2025 Mustofa Amami <amammustofa@gmail.com>
// SPDX-License-Identifier: MIT

//! Contact form API for the portfolio site.
//!
//! This crate provides the rate-limited contact endpoint behind the site's
//! contact page:
//!
//! - Fixed-window per-IP rate limiting (5 submissions per 15 minutes default)
//! - Server-side validation with field-specific error messages
//! - HTML entity escaping of untrusted text before it is embedded anywhere
//! - Email dispatch through a Resend-style API, degrading to a logging
//!   fallback when no API key is configured or dispatch fails

pub mod config;
pub mod handlers;
pub mod limiter;
pub mod mailer;
pub mod metrics;
pub mod pipeline;
pub mod sanitize;
pub mod validator;

pub use config::Config;
pub use limiter::{RateLimitDecision, RateLimiter};
pub use mailer::{HttpMailer, MailerError, OutboundEmail, SendEmail};
pub use pipeline::{ContactPipeline, DispatchOutcome, Submitted};
pub use validator::{ContactForm, ValidationError};
