use crate::fqdn::Fqdn;
use crate::monitored_state::SortedIpSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observed change, recorded into the 5-minute-wide global bucket
/// that `CoordinatedChangeDetector` reads across a 10-minute window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalChangeEntry {
    pub domain: String,
    pub ips: SortedIpSet,
    pub timestamp_ms: i64,
}

impl GlobalChangeEntry {
    pub fn new(domain: &Fqdn, ips: SortedIpSet, at: DateTime<Utc>) -> Self {
        Self {
            domain: domain.as_str().to_string(),
            ips,
            timestamp_ms: at.timestamp_millis(),
        }
    }
}

pub const BUCKET_WIDTH_MS: i64 = 5 * 60 * 1000;
pub const BUCKET_TTL_SECS: u64 = 3600;

pub fn bucket_key(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis() / BUCKET_WIDTH_MS
}
