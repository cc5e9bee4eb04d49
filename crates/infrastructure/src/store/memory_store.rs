use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dns_sentinel_application::ports::Store;
use dns_sentinel_domain::DomainError;

struct Entry {
    value: String,
    expires_at: Option<i64>,
}

/// In-process `Store` for tests and local development — never persists
/// across restarts.
#[derive(Default)]
pub struct MemoryStore {
    data: DashMap<String, Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let expired = match self.data.get(key) {
            Some(entry) => matches!(entry.expires_at, Some(at) if at <= Utc::now().timestamp()),
            None => return Ok(None),
        };
        if expired {
            self.data.remove(key);
            return Ok(None);
        }
        Ok(self.data.get(key).map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), DomainError> {
        self.data.insert(key.to_string(), Entry { value, expires_at: None });
        Ok(())
    }

    async fn set_with_ttl(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), DomainError> {
        let expires_at = Utc::now().timestamp() + ttl_secs as i64;
        self.data.insert(key.to_string(), Entry { value, expires_at: Some(expires_at) });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.data.remove(key);
        Ok(())
    }
}
