use async_trait::async_trait;
use dns_sentinel_domain::{DomainError, Notification};

/// Transport seam to the external chat module (spec §1/§6). The core
/// never constructs transport payloads itself — it hands over an
/// already-built `Notification` and gets back success or failure.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn emit(&self, notification: &Notification) -> Result<(), DomainError>;
}
