use dns_sentinel_domain::{DomainError, Fqdn};

use crate::repo::DomainStateRepo;

/// `ClearDampening(fqdn)` (spec §6) — ends any active suppression window
/// without touching the domain's resolution state or IP history.
pub async fn clear_dampening(repo: &DomainStateRepo, fqdn: &Fqdn) -> Result<(), DomainError> {
    repo.clear_dampening(fqdn).await
}
