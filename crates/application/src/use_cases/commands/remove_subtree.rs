use dns_sentinel_domain::{DomainError, Fqdn};

use crate::repo::DomainStateRepo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveSubtreeOutcome {
    Removed(Vec<Fqdn>),
    Refused,
}

/// `RemoveSubtree(fqdn)` — removes `fqdn` and any stored domain suffixed
/// with `.fqdn`; static matches are refused entirely (spec §6).
pub async fn remove_subtree(
    repo: &DomainStateRepo,
    static_domains: &[Fqdn],
    fqdn: &Fqdn,
) -> Result<RemoveSubtreeOutcome, DomainError> {
    let dynamic = repo.dynamic_domains().await?;

    let matches: Vec<&Fqdn> = dynamic
        .iter()
        .filter(|d| *d == fqdn || d.is_subdomain_of(fqdn))
        .collect();

    let static_hit = static_domains
        .iter()
        .any(|d| d == fqdn || d.is_subdomain_of(fqdn));
    if static_hit {
        return Ok(RemoveSubtreeOutcome::Refused);
    }

    if matches.is_empty() {
        return Ok(RemoveSubtreeOutcome::Removed(Vec::new()));
    }

    let removed: Vec<Fqdn> = matches.into_iter().cloned().collect();
    let remaining: Vec<Fqdn> = dynamic.into_iter().filter(|d| !removed.contains(d)).collect();
    repo.set_dynamic_domains(&remaining).await?;
    for d in &removed {
        repo.delete_all(d).await?;
    }

    Ok(RemoveSubtreeOutcome::Removed(removed))
}
