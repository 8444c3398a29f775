// src/models/contact.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

lazy_static::lazy_static! {
    static ref EMAIL_PATTERN: regex::Regex =
        regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid");
}

/// Inbound contact form body. Every field is optional on the wire so that a
/// missing field reports as a validation error rather than a decode error.
#[derive(Debug, Default, Deserialize)]
pub struct ContactPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
}

/// A stored contact submission. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Field name -> human readable message.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

/// Trimmed, validated form values, ready to be stamped into a submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}

impl ValidContact {
    pub fn into_submission(self) -> ContactSubmission {
        ContactSubmission {
            id: Uuid::new_v4(),
            name: self.name,
            email: self.email,
            company: self.company,
            message: self.message,
            created_at: Utc::now(),
        }
    }
}

fn trimmed(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or("")
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

impl ContactPayload {
    /// Checks every field in one pass and reports all failures together.
    pub fn validate(&self) -> Result<ValidContact, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = trimmed(&self.name);
        if name.is_empty() {
            errors.insert("name", "Name is required.");
        }

        let email = trimmed(&self.email);
        if email.is_empty() {
            errors.insert("email", "Email is required.");
        } else if !is_valid_email(self.email.as_deref().unwrap_or_default()) {
            errors.insert("email", "Invalid email format.");
        }

        let message = trimmed(&self.message);
        if message.is_empty() {
            errors.insert("message", "Message is required.");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidContact {
            name: name.to_string(),
            email: email.to_string(),
            company: trimmed(&self.company).to_string(),
            message: message.to_string(),
        })
    }
}
