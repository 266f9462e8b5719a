//! SendGrid v3 mail client

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

use super::{EmailMessage, NotifyError, Notifier};

const USER_AGENT: &str = concat!("mnu-web/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'static str,
    value: &'a str,
}

/// Sends mail through the SendGrid HTTP API
pub struct SendGridNotifier {
    http_client: reqwest::Client,
    api_key: String,
    from: String,
    api_url: String,
}

impl SendGridNotifier {
    pub fn new(api_key: String, from: String, api_url: String) -> Result<Self, NotifyError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NotifyError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            from,
            api_url,
        })
    }

    // SendGrid requires text/plain before text/html and rejects empty values
    fn payload<'a>(&'a self, message: &'a EmailMessage) -> SendRequest<'a> {
        let mut content = Vec::with_capacity(2);
        if let Some(text) = message.text.as_deref().filter(|t| !t.is_empty()) {
            content.push(Content {
                content_type: "text/plain",
                value: text,
            });
        }
        content.push(Content {
            content_type: "text/html",
            value: &message.html,
        });

        SendRequest {
            personalizations: vec![Personalization {
                to: vec![Address { email: &message.to }],
            }],
            from: Address { email: &self.from },
            subject: &message.subject,
            content,
        }
    }
}

#[async_trait]
impl Notifier for SendGridNotifier {
    fn name(&self) -> &'static str {
        "sendgrid"
    }

    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        debug!(to = %message.to, subject = %message.subject, "Sending email via SendGrid");

        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&self.payload(message))
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        info!(to = %message.to, status = status.as_u16(), "Email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier() -> SendGridNotifier {
        SendGridNotifier::new(
            "SG.test".to_string(),
            "noreply@example.org".to_string(),
            "http://127.0.0.1:1/send".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_payload_shape() {
        let message = EmailMessage {
            to: "union@example.org".to_string(),
            subject: "New MNU Affiliation Request".to_string(),
            html: "<p>Hi</p>".to_string(),
            text: Some("Hi".to_string()),
        };
        let sender = notifier();
        let json = serde_json::to_value(sender.payload(&message)).unwrap();

        assert_eq!(json["personalizations"][0]["to"][0]["email"], "union@example.org");
        assert_eq!(json["from"]["email"], "noreply@example.org");
        assert_eq!(json["subject"], "New MNU Affiliation Request");
        assert_eq!(json["content"][0]["type"], "text/plain");
        assert_eq!(json["content"][1]["type"], "text/html");
        assert_eq!(json["content"][1]["value"], "<p>Hi</p>");
    }

    #[test]
    fn test_payload_without_text_part() {
        let message = EmailMessage {
            to: "union@example.org".to_string(),
            subject: "s".to_string(),
            html: "<p>Hi</p>".to_string(),
            text: Some(String::new()),
        };
        let sender = notifier();
        let json = serde_json::to_value(sender.payload(&message)).unwrap();

        assert_eq!(json["content"].as_array().unwrap().len(), 1);
        assert_eq!(json["content"][0]["type"], "text/html");
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_transport_error() {
        let message = EmailMessage {
            to: "union@example.org".to_string(),
            subject: "s".to_string(),
            html: "<p>Hi</p>".to_string(),
            text: None,
        };
        let result = notifier().send(&message).await;
        assert!(matches!(result, Err(NotifyError::Transport(_))));
    }
}
