use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-domain resolution state. Initial value is `Unseen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainState {
    Unseen,
    Resolved,
    NoAuthority,
}

impl DomainState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainState::Unseen => "unseen",
            DomainState::Resolved => "resolved",
            DomainState::NoAuthority => "no_authority",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unseen" => Some(DomainState::Unseen),
            "resolved" => Some(DomainState::Resolved),
            "no_authority" => Some(DomainState::NoAuthority),
            _ => None,
        }
    }
}

/// Canonical form of an A-record set: sorted ascending lexicographically,
/// deduplicated. All comparisons and persisted representations go through
/// this type so the "canonical IPs" invariant (spec §8) holds by
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortedIpSet(Vec<String>);

impl SortedIpSet {
    pub fn new(mut ips: Vec<String>) -> Self {
        ips.sort();
        ips.dedup();
        Self(ips)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    /// Comma-separated sorted IPs, matching the `dns:<fqdn>:ips` value shape.
    pub fn to_csv(&self) -> String {
        self.0.join(",")
    }

    pub fn from_csv(csv: &str) -> Self {
        if csv.is_empty() {
            return Self::empty();
        }
        Self::new(csv.split(',').map(|s| s.to_string()).collect())
    }

    pub fn is_disjoint(&self, other: &SortedIpSet) -> bool {
        self.0.iter().all(|ip| !other.0.contains(ip))
    }

    pub fn intersection_count(&self, other: &SortedIpSet) -> usize {
        self.0.iter().filter(|ip| other.0.contains(ip)).count()
    }

    pub fn union_count(&self, other: &SortedIpSet) -> usize {
        let mut all: Vec<&String> = self.0.iter().chain(other.0.iter()).collect();
        all.sort();
        all.dedup();
        all.len()
    }
}

/// One entry of the bounded, time-windowed IP history used by the
/// load-balancer analyzer and the oscillation check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpHistoryEntry {
    pub ips: SortedIpSet,
    pub at: DateTime<Utc>,
}

/// Durable per-domain monitoring state (spec §3).
#[derive(Debug, Clone)]
pub struct MonitoredState {
    pub state: DomainState,
    pub last_ips: SortedIpSet,
    pub last_serial: Option<String>,
    pub last_notification_at: Option<DateTime<Utc>>,
    pub recent_ip_history: Vec<IpHistoryEntry>,
    /// Hard end of an active auto-suppression window (spec §4.8: "for
    /// the following 4 hours no further notifications are emitted"). Not
    /// part of spec §6's bit-exact keyspace table — an ambient
    /// supplement stored at `notify:<fqdn>:auto_suppressed_until` so the
    /// 4-hour guarantee holds even if the storm that triggered it
    /// subsides before the window closes (see DESIGN.md).
    pub auto_suppressed_until: Option<DateTime<Utc>>,
}

impl Default for MonitoredState {
    fn default() -> Self {
        Self {
            state: DomainState::Unseen,
            last_ips: SortedIpSet::empty(),
            last_serial: None,
            last_notification_at: None,
            recent_ip_history: Vec::new(),
            auto_suppressed_until: None,
        }
    }
}

/// Retention bound for `recent_ip_history`: at most 10 entries, and never
/// older than 7 days.
pub const MAX_IP_HISTORY_ENTRIES: usize = 10;
pub const IP_HISTORY_FRESHNESS: chrono::Duration = chrono::Duration::days(7);

impl MonitoredState {
    /// Appends `ips` at `at`, then tail-trims to the bound above. Entries
    /// are kept ordered by `at` ascending.
    pub fn push_ip_history(&mut self, ips: SortedIpSet, at: DateTime<Utc>) {
        self.recent_ip_history.push(IpHistoryEntry { ips, at });
        self.recent_ip_history.sort_by_key(|e| e.at);

        let horizon = at - IP_HISTORY_FRESHNESS;
        self.recent_ip_history.retain(|e| e.at >= horizon);

        let len = self.recent_ip_history.len();
        if len > MAX_IP_HISTORY_ENTRIES {
            self.recent_ip_history.drain(0..len - MAX_IP_HISTORY_ENTRIES);
        }
    }

    /// Number of distinct-signature entries whose `at` falls within the
    /// last `window` of `now` — the count the dampening calculator uses
    /// for its "N changes in the last hour" multiplier.
    pub fn changes_within(&self, now: DateTime<Utc>, window: chrono::Duration) -> usize {
        let horizon = now - window;
        self.recent_ip_history
            .iter()
            .filter(|e| e.at >= horizon)
            .count()
    }

    /// True iff `ips`'s signature was already observed within `window` of
    /// `now` (but is not necessarily the most recent entry) — the
    /// oscillation check.
    pub fn has_seen_signature_within(
        &self,
        ips: &SortedIpSet,
        now: DateTime<Utc>,
        window: chrono::Duration,
    ) -> bool {
        let horizon = now - window;
        self.recent_ip_history
            .iter()
            .any(|e| e.at >= horizon && &e.ips == ips)
    }
}
