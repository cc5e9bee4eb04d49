use chrono::{DateTime, Utc};
use dns_sentinel_domain::{DomainError, DomainState, Fqdn, SortedIpSet};

use crate::repo::DomainStateRepo;

#[derive(Debug, Clone)]
pub struct DomainStatus {
    pub state: DomainState,
    pub last_ips: SortedIpSet,
    pub last_serial: Option<String>,
    pub last_notification_at: Option<DateTime<Utc>>,
}

/// `GetStatus(fqdn)` (spec §6).
pub async fn get_status(repo: &DomainStateRepo, fqdn: &Fqdn) -> Result<DomainStatus, DomainError> {
    let state = repo.load(fqdn).await?;
    Ok(DomainStatus {
        state: state.state,
        last_ips: state.last_ips,
        last_serial: state.last_serial,
        last_notification_at: state.last_notification_at,
    })
}
