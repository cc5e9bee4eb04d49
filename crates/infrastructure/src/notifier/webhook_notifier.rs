use async_trait::async_trait;
use dns_sentinel_application::ports::Notifier;
use dns_sentinel_domain::{DomainError, Notification};
use std::time::Duration;
use tracing::{debug, instrument};

/// Posts the notification as JSON to a webhook URL. Wire format and
/// embed rendering are out of scope here (spec §1) — this adapter sends
/// the `Notification` struct as-is; a richer transport belongs in the
/// external chat module.
pub struct WebhookNotifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl WebhookNotifier {
    pub fn new(webhook_url: String, timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client, webhook_url }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    #[instrument(skip(self, notification))]
    async fn emit(&self, notification: &Notification) -> Result<(), DomainError> {
        debug!(url = %self.webhook_url, title = %notification.title, "posting notification to webhook");

        let response = self
            .client
            .post(&self.webhook_url)
            .json(notification)
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("webhook post to {} failed: {e}", self.webhook_url)))?;

        if !response.status().is_success() {
            return Err(DomainError::Transport(format!(
                "webhook {} returned HTTP {}",
                self.webhook_url,
                response.status()
            )));
        }

        Ok(())
    }
}
