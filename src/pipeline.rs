// SPDX-FileCopyrightText: 2025 Mustofa Amami <amammustofa@gmail.com>
// SPDX-License-Identifier: MIT

//! Contact submission pipeline: validate, sanitize, compose, dispatch.
//!
//! Validation failures are the only user-visible errors. Once a submission
//! validates, the caller always gets a success: a missing or failing email
//! sender is logged and swallowed, so infrastructure trouble never leaks to
//! the person filling out the form.

use crate::config::EmailConfig;
use crate::mailer::{OutboundEmail, SendEmail};
use crate::metrics;
use crate::sanitize::escape_html;
use crate::validator::{validate, ContactForm, ValidationError};
use tracing::{error, info};

/// Confirmation message returned for every accepted submission.
pub const CONFIRMATION_MESSAGE: &str =
    "Your message has been sent successfully! I'll get back to you soon.";

/// How an accepted submission left the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The email sender accepted the message
    Sent,
    /// No sender configured; the composed body was logged instead
    LoggedNotConfigured,
    /// The sender failed; the error and the composed body were logged
    LoggedAfterFailure,
}

/// Result of an accepted submission.
#[derive(Debug, Clone)]
pub struct Submitted {
    /// Fixed confirmation text for the client
    pub message: &'static str,
    /// Internal record of what happened to the email
    pub outcome: DispatchOutcome,
}

/// The contact submission pipeline.
///
/// Generic over the email sender so tests can substitute one; `None` models
/// a deployment without email credentials.
pub struct ContactPipeline<M: SendEmail> {
    mailer: Option<M>,
    from_address: String,
    to_address: String,
}

impl<M: SendEmail> ContactPipeline<M> {
    /// Create a pipeline with an optional email sender.
    pub fn new(mailer: Option<M>, config: &EmailConfig) -> Self {
        Self {
            mailer,
            from_address: config.from_address.clone(),
            to_address: config.to_address.clone(),
        }
    }

    /// Process one submission end to end.
    ///
    /// Errors only on validation failure; email transport problems degrade
    /// to a logged soft-success.
    pub async fn submit(&self, form: &ContactForm) -> Result<Submitted, ValidationError> {
        validate(form)?;

        // Sanitize after validation: rules run on raw trimmed input, escaping
        // applies only to what gets embedded downstream.
        let name = escape_html(form.name.trim());
        let email = escape_html(form.email.trim());
        let subject = escape_html(form.subject.trim());
        let message = escape_html(form.message.trim());

        let body = compose_body(&name, &email, &subject, &message);
        let outbound = OutboundEmail {
            from: self.from_address.clone(),
            to: self.to_address.clone(),
            subject: format!("Contact Form: {subject}"),
            text: body,
            // Envelope-level address stays raw so replies actually route.
            reply_to: form.email.trim().to_string(),
        };

        let outcome = match &self.mailer {
            None => {
                info!(body = %outbound.text, "Email dispatch not configured; logging submission");
                DispatchOutcome::LoggedNotConfigured
            }
            Some(mailer) => match mailer.send(&outbound).await {
                Ok(()) => {
                    info!(to = %outbound.to, "Contact email sent");
                    metrics::EMAILS_SENT.inc();
                    DispatchOutcome::Sent
                }
                Err(err) => {
                    error!(
                        error = %err,
                        body = %outbound.text,
                        "Email dispatch failed; submission logged instead"
                    );
                    metrics::EMAIL_FAILURES.inc();
                    DispatchOutcome::LoggedAfterFailure
                }
            },
        };

        Ok(Submitted {
            message: CONFIRMATION_MESSAGE,
            outcome,
        })
    }
}

/// Fixed plain-text template for the outbound message body.
fn compose_body(name: &str, email: &str, subject: &str, message: &str) -> String {
    format!(
        "New Contact Form Submission\n\
         \n\
         From: {name}\n\
         Email: {email}\n\
         Subject: {subject}\n\
         \n\
         Message:\n\
         {message}\n\
         \n\
         ---\n\
         Sent from Portfolio Contact Form"
    )
}
