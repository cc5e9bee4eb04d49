use dns_sentinel_domain::{DomainError, Fqdn};

use crate::repo::DomainStateRepo;

#[derive(Debug, Clone)]
pub struct DomainList {
    pub static_domains: Vec<Fqdn>,
    pub dynamic_domains: Vec<Fqdn>,
}

pub async fn list_domains(repo: &DomainStateRepo, static_domains: &[Fqdn]) -> Result<DomainList, DomainError> {
    Ok(DomainList {
        static_domains: static_domains.to_vec(),
        dynamic_domains: repo.dynamic_domains().await?,
    })
}
