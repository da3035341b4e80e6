// SPDX-FileCopyrightText: 2025 Mustofa Amami <amammustofa@gmail.com>
// SPDX-License-Identifier: MIT

//! Outbound email dispatch.
//!
//! [`HttpMailer`] talks to a Resend-style HTTPS JSON API and only exists when
//! an API key is configured. The [`SendEmail`] trait is the seam the
//! submission pipeline depends on, so tests can substitute a failing or
//! recording sender.

use crate::config::EmailConfig;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// One composed message ready for dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    #[serde(rename = "reply_to")]
    pub reply_to: String,
}

/// Email dispatch error types.
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("email API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("email API returned status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Capability to send one email.
#[async_trait]
pub trait SendEmail: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError>;
}

/// Email sender backed by an HTTPS JSON API.
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl HttpMailer {
    /// Build a mailer from configuration.
    ///
    /// Returns `None` when no API key is configured, which disables real
    /// dispatch entirely; the pipeline falls back to logging.
    pub fn from_config(config: &EmailConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        let client = reqwest::Client::builder()
            .timeout(config.send_timeout())
            .build()
            .ok()?;

        Some(Self {
            client,
            api_url: config.api_url.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl SendEmail for HttpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError> {
        debug!(to = %email.to, subject = %email.subject, "Dispatching email");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(MailerError::Api { status, body })
        }
    }
}
