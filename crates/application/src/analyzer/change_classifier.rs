use chrono::{DateTime, Utc};
use dns_sentinel_domain::{ChangeContext, ChangeType, Severity, SortedIpSet, TemporalContext};

/// Computes change type and base severity from previous/current IP sets
/// and TTL (spec §4.6). Coordinated-change and dampening stages may
/// further enrich the result; this function never reads the store.
pub fn classify_change(
    previous_ips: &SortedIpSet,
    current_ips: &SortedIpSet,
    ttl_secs: u32,
    temporal: &TemporalContext,
    now: DateTime<Utc>,
) -> ChangeContext {
    let change_type = if previous_ips.is_empty() {
        ChangeType::Addition
    } else if current_ips.is_empty() {
        ChangeType::Removal
    } else if previous_ips.is_disjoint(current_ips) {
        ChangeType::CompleteChange
    } else {
        ChangeType::Replacement
    };

    let severity = if change_type == ChangeType::CompleteChange && temporal.is_business_hours {
        Severity::Critical
    } else if change_type == ChangeType::Removal {
        Severity::High
    } else if temporal.is_maintenance_window {
        Severity::Low
    } else {
        Severity::Medium
    };

    ChangeContext {
        change_type,
        severity,
        ttl_secs,
        confidence: 0.8,
        at: now,
    }
}
