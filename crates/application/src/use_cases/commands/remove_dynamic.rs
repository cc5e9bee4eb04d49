use dns_sentinel_domain::{DomainError, Fqdn};

use crate::repo::DomainStateRepo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveDynamicOutcome {
    Removed,
    NotFound,
}

/// `RemoveDynamic(fqdn) → removed|not_found` (spec §6). Static domains are
/// never removable through this path — they simply report `NotFound`,
/// since from the dynamic list's point of view they were never present.
pub async fn remove_dynamic(
    repo: &DomainStateRepo,
    static_domains: &[Fqdn],
    fqdn: &Fqdn,
) -> Result<RemoveDynamicOutcome, DomainError> {
    if static_domains.contains(fqdn) {
        return Ok(RemoveDynamicOutcome::NotFound);
    }

    let mut dynamic = repo.dynamic_domains().await?;
    let before = dynamic.len();
    dynamic.retain(|d| d != fqdn);
    if dynamic.len() == before {
        return Ok(RemoveDynamicOutcome::NotFound);
    }

    repo.set_dynamic_domains(&dynamic).await?;
    repo.delete_all(fqdn).await?;
    Ok(RemoveDynamicOutcome::Removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Store;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    struct MemoryStore(Mutex<HashMap<String, String>>);

    #[async_trait]
    impl Store for MemoryStore {
        async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }
        async fn set(&self, key: &str, value: String) -> Result<(), DomainError> {
            self.0.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }
        async fn set_with_ttl(&self, key: &str, value: String, _ttl: u64) -> Result<(), DomainError> {
            self.0.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }
        async fn delete(&self, key: &str) -> Result<(), DomainError> {
            self.0.lock().unwrap().remove(key);
            Ok(())
        }
    }

    fn repo() -> DomainStateRepo {
        DomainStateRepo::new(Arc::new(MemoryStore(Mutex::new(HashMap::new()))))
    }

    #[tokio::test]
    async fn removes_present_dynamic_domain() {
        let repo = repo();
        let fqdn = Fqdn::parse("gone.example.com").unwrap();
        repo.set_dynamic_domains(&[fqdn.clone()]).await.unwrap();

        let outcome = remove_dynamic(&repo, &[], &fqdn).await.unwrap();
        assert_eq!(outcome, RemoveDynamicOutcome::Removed);
        assert!(repo.dynamic_domains().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reports_not_found_for_absent_domain() {
        let repo = repo();
        let fqdn = Fqdn::parse("absent.example.com").unwrap();
        let outcome = remove_dynamic(&repo, &[], &fqdn).await.unwrap();
        assert_eq!(outcome, RemoveDynamicOutcome::NotFound);
    }

    #[tokio::test]
    async fn refuses_static_domain() {
        let repo = repo();
        let fqdn = Fqdn::parse("static.example.com").unwrap();
        let outcome = remove_dynamic(&repo, &[fqdn.clone()], &fqdn).await.unwrap();
        assert_eq!(outcome, RemoveDynamicOutcome::NotFound);
    }
}
