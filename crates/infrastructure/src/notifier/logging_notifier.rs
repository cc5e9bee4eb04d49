use async_trait::async_trait;
use dns_sentinel_application::ports::Notifier;
use dns_sentinel_domain::{DomainError, Notification};
use tracing::info;

/// Emits notifications as structured log events instead of a chat
/// transport — the default adapter when no webhook URL is configured.
pub struct LoggingNotifier;

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn emit(&self, notification: &Notification) -> Result<(), DomainError> {
        info!(
            kind = notification.kind_label,
            title = notification.title,
            severity_color = ?notification.severity_color,
            fields = ?notification.fields,
            actions = ?notification.actions,
            "notification"
        );
        Ok(())
    }
}
