//! Degraded-mode notifier
//!
//! Used when no provider credential is configured. Nothing leaves the
//! process; the message is visible only in the log.

use async_trait::async_trait;
use tracing::info;

use super::{EmailMessage, NotifyError, Notifier};

/// Logs each message and reports success
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "Email delivery disabled, message logged instead"
        );
        info!("HTML content:\n{}", message.html);
        if let Some(text) = &message.text {
            info!("Text content:\n{}", text);
        }
        Ok(())
    }
}
