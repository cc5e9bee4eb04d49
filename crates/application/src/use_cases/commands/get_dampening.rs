use chrono::{DateTime, Duration, Utc};
use dns_sentinel_domain::{DomainError, Fqdn};

use crate::repo::DomainStateRepo;

#[derive(Debug, Clone)]
pub struct DampeningStatus {
    pub last_notification_at: Option<DateTime<Utc>>,
    pub auto_suppressed_until: Option<DateTime<Utc>>,
    pub changes_in_last_hour: usize,
}

/// `GetDampening(fqdn)` (spec §6) — read-only view of the oscillation and
/// auto-suppression bookkeeping for one domain.
pub async fn get_dampening(repo: &DomainStateRepo, fqdn: &Fqdn) -> Result<DampeningStatus, DomainError> {
    let state = repo.load(fqdn).await?;
    let now = Utc::now();
    Ok(DampeningStatus {
        last_notification_at: state.last_notification_at,
        auto_suppressed_until: state.auto_suppressed_until,
        changes_in_last_hour: state.changes_within(now, Duration::hours(1)),
    })
}
