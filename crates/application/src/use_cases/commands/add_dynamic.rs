use dns_sentinel_domain::{DomainError, Fqdn};

use crate::repo::DomainStateRepo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddDynamicOutcome {
    Added,
    Duplicate,
    Invalid(String),
}

/// `AddDynamic(fqdn) → added|duplicate|invalid` (spec §6).
pub async fn add_dynamic(
    repo: &DomainStateRepo,
    static_domains: &[Fqdn],
    raw: &str,
) -> Result<AddDynamicOutcome, DomainError> {
    let fqdn = match Fqdn::parse(raw) {
        Ok(f) => f,
        Err(DomainError::Validation(reason)) => return Ok(AddDynamicOutcome::Invalid(reason)),
        Err(other) => return Err(other),
    };

    let mut dynamic = repo.dynamic_domains().await?;
    if static_domains.contains(&fqdn) || dynamic.contains(&fqdn) {
        return Ok(AddDynamicOutcome::Duplicate);
    }

    dynamic.push(fqdn);
    repo.set_dynamic_domains(&dynamic).await?;
    Ok(AddDynamicOutcome::Added)
}
