// Transactional email client used for contact form notifications
// Posts a JSON message to an HTTP mail API with a bearer key

use crate::config::EmailConfig;
use crate::models::contact::ContactSubmission;
use crate::services::notifier::ContactNotifier;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Email API error ({status}): {body}")]
    Api { status: u16, body: String },
}

#[derive(Clone)]
pub struct EmailClient {
    client: Client,
    config: EmailConfig,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    pub reply_to: String,
}

impl EmailClient {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn build_message(&self, submission: &ContactSubmission) -> EmailMessage {
        let company = if submission.company.is_empty() {
            "—"
        } else {
            submission.company.as_str()
        };

        let text = format!(
            "Name: {}\nEmail: {}\nCompany: {}\nReceived: {}\n\n{}\n",
            submission.name,
            submission.email,
            company,
            submission.created_at.to_rfc3339(),
            submission.message
        );

        EmailMessage {
            from: self.config.from.clone(),
            to: vec![self.config.to.clone()],
            subject: format!("New contact form submission from {}", submission.name),
            text,
            reply_to: submission.email.clone(),
        }
    }

    pub async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(message)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Api { status, body });
        }

        Ok(())
    }
}

#[async_trait]
impl ContactNotifier for EmailClient {
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), EmailError> {
        let message = self.build_message(submission);
        self.send(&message).await?;
        tracing::info!("📧 Contact notification sent for submission {}", submission.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn client() -> EmailClient {
        EmailClient::new(EmailConfig {
            api_key: "key".to_string(),
            api_url: "http://localhost/emails".to_string(),
            from: "site@hone.test".to_string(),
            to: "hello@hone.test".to_string(),
        })
    }

    fn submission(company: &str) -> ContactSubmission {
        ContactSubmission {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            company: company.to_string(),
            message: "Hi there".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_message_fields() {
        let message = client().build_message(&submission("Acme"));
        assert_eq!(message.from, "site@hone.test");
        assert_eq!(message.to, vec!["hello@hone.test".to_string()]);
        assert_eq!(message.subject, "New contact form submission from Ada");
        assert_eq!(message.reply_to, "ada@example.com");
        assert!(message.text.contains("Company: Acme"));
        assert!(message.text.ends_with("Hi there\n"));
    }

    #[test]
    fn test_missing_company_placeholder() {
        let message = client().build_message(&submission(""));
        assert!(message.text.contains("Company: —"));
    }
}
