// SPDX-FileCopyrightText: 2025 Mustofa Amami <amammustofa@gmail.com>
// SPDX-License-Identifier: MIT

//! Configuration for the contact form API service.
//!
//! Default rate limit values match the deployed policy for the portfolio
//! contact endpoint: 5 requests per 15 minutes per client.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the contact form API service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Outbound email configuration
    #[serde(default)]
    pub email: EmailConfig,
}

/// Rate limiting configuration for the contact endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum accepted submissions per client within one window (default: 5)
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in minutes (default: 15)
    #[serde(default = "default_window_minutes")]
    pub window_minutes: u64,

    /// Interval between cleanup passes in seconds (default: 300)
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
}

/// Outbound email configuration.
///
/// When `api_key` is absent the service never attempts real dispatch and
/// falls back to logging composed messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// API key for the email provider (default: none, dispatch disabled)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sender address (default: Portfolio Contact <onboarding@resend.dev>)
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Recipient address (default: site owner)
    #[serde(default = "default_to_address")]
    pub to_address: String,

    /// Email provider endpoint (default: https://api.resend.com/emails)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Timeout for one dispatch attempt in seconds (default: 10)
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_requests() -> u32 {
    5
}

fn default_window_minutes() -> u64 {
    15
}

fn default_cleanup_interval_secs() -> u64 {
    300
}

fn default_from_address() -> String {
    "Portfolio Contact <onboarding@resend.dev>".to_string()
}

fn default_to_address() -> String {
    "amammustofa@gmail.com".to_string()
}

fn default_api_url() -> String {
    "https://api.resend.com/emails".to_string()
}

fn default_send_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            rate_limit: RateLimitConfig::default(),
            email: EmailConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_minutes: default_window_minutes(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            from_address: default_from_address(),
            to_address: default_to_address(),
            api_url: default_api_url(),
            send_timeout_secs: default_send_timeout_secs(),
        }
    }
}

impl RateLimitConfig {
    /// Get the window duration
    pub fn window_duration(&self) -> Duration {
        Duration::from_secs(self.window_minutes * 60)
    }

    /// Get the window duration in milliseconds
    pub fn window_ms(&self) -> i64 {
        (self.window_minutes * 60 * 1000) as i64
    }

    /// Get the interval between cleanup passes
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}

impl EmailConfig {
    /// Get the timeout for one dispatch attempt
    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }
}
