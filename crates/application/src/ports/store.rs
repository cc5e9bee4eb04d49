use async_trait::async_trait;
use dns_sentinel_domain::DomainError;

/// Durable key/value abstraction with optional per-key expiry (spec §2.1).
/// All repo operations are read-modify-write with last-writer-wins
/// semantics — see spec §5 "Shared resources".
#[async_trait]
pub trait Store: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    async fn set(&self, key: &str, value: String) -> Result<(), DomainError>;

    /// Same as `set`, but the key expires after `ttl_secs` (spec §6:
    /// `notify:*` and `global:*` keys carry TTLs).
    async fn set_with_ttl(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), DomainError>;

    async fn delete(&self, key: &str) -> Result<(), DomainError>;
}
