//! Notification dispatch
//!
//! Every accepted submission produces one email to the union mailbox. The
//! delivery strategy is chosen once at startup: [`SendGridNotifier`] when a
//! provider credential is configured, [`LogNotifier`] otherwise.

mod log_sender;
mod sendgrid;
pub mod templates;

pub use log_sender::LogNotifier;
pub use sendgrid::SendGridNotifier;

use async_trait::async_trait;
use mnu_common::config::EmailConfig;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// An outgoing email
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Notification delivery errors
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Provider error {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

/// Delivery strategy
///
/// `send` reports every failure as a `NotifyError`; it never panics.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short identifier for logs
    fn name(&self) -> &'static str;

    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError>;
}

/// Pick the delivery strategy for the resolved email settings
pub fn notifier_from_config(config: &EmailConfig) -> Result<Arc<dyn Notifier>, NotifyError> {
    match &config.api_key {
        Some(api_key) => {
            info!(from = %config.from, api_url = %config.api_url, "Email delivery via SendGrid");
            let notifier =
                SendGridNotifier::new(api_key.clone(), config.from.clone(), config.api_url.clone())?;
            Ok(Arc::new(notifier))
        }
        None => {
            warn!("SENDGRID_API_KEY is not set; notifications will be logged, not sent");
            Ok(Arc::new(LogNotifier))
        }
    }
}
