// SPDX-FileCopyrightText: 2025 Mustofa Amami <amammustofa@gmail.com>
// SPDX-License-Identifier: MIT

//! Server-side validation of contact form submissions.
//!
//! The server never trusts the client: every submission is re-checked here
//! even though the site's form validates before sending. Rules run in a
//! fixed order and stop at the first failure: presence, email format, name
//! length, subject length, message length. Lengths are measured in
//! characters on trimmed input.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Minimum lengths for the free-text fields, in characters.
const MIN_NAME_CHARS: usize = 2;
const MIN_SUBJECT_CHARS: usize = 3;
const MIN_MESSAGE_CHARS: usize = 10;

/// One contact form submission, as received from the client.
///
/// Fields default to empty so an absent field lands in the "all fields
/// required" branch rather than failing to decode.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Validation error types. The display strings are the exact messages
/// returned to the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Name must be at least 2 characters long")]
    NameTooShort,

    #[error("Subject must be at least 3 characters long")]
    SubjectTooShort,

    #[error("Message must be at least 10 characters long")]
    MessageTooShort,
}

/// Validate a submission, short-circuiting on the first failing rule.
pub fn validate(form: &ContactForm) -> Result<(), ValidationError> {
    let name = form.name.trim();
    let email = form.email.trim();
    let subject = form.subject.trim();
    let message = form.message.trim();

    if name.is_empty() || email.is_empty() || subject.is_empty() || message.is_empty() {
        debug!("Submission rejected: missing fields");
        return Err(ValidationError::MissingFields);
    }

    if !is_valid_email(email) {
        debug!(email, "Submission rejected: invalid email format");
        return Err(ValidationError::InvalidEmail);
    }

    if name.chars().count() < MIN_NAME_CHARS {
        debug!("Submission rejected: name too short");
        return Err(ValidationError::NameTooShort);
    }

    if subject.chars().count() < MIN_SUBJECT_CHARS {
        debug!("Submission rejected: subject too short");
        return Err(ValidationError::SubjectTooShort);
    }

    if message.chars().count() < MIN_MESSAGE_CHARS {
        debug!("Submission rejected: message too short");
        return Err(ValidationError::MessageTooShort);
    }

    Ok(())
}

/// Basic `local@domain.tld` check: exactly one `@`, no whitespace, non-empty
/// local part, and a domain with a dot that is neither first nor last.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };

    if local.is_empty() {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
