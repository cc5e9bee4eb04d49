//! End-to-end scenario tests against in-memory adapters, mirroring the
//! literal inputs/expected outputs scenarios and invariants used to
//! validate the analyzer pipeline.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use dns_sentinel_application::analyzer::{
    analyze_load_balancer, build_notification, calculate_dampening, classify_change, detect_cdn,
    temporal_context, DampeningInputs, NotificationInputs,
};
use dns_sentinel_application::ports::{ARecord, Notifier, ResolveResult, Resolver, SoaRecord, Store};
use dns_sentinel_application::repo::DomainStateRepo;
use dns_sentinel_application::use_cases::Observer;
use dns_sentinel_domain::{
    CdnInfo, CoordinationResult, DomainError, DomainState, Fqdn, IpHistoryEntry, LbResult,
    Notification, SortedIpSet,
};

struct MemoryStore {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    fn new() -> Self {
        Self { data: Mutex::new(HashMap::new()) }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.data.lock().unwrap().get(key).cloned())
    }
    async fn set(&self, key: &str, value: String) -> Result<(), DomainError> {
        self.data.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }
    async fn set_with_ttl(&self, key: &str, value: String, _ttl_secs: u64) -> Result<(), DomainError> {
        self.data.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }
    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.data.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Resolver that returns a fixed, reconfigurable answer. Each test owns
/// its own `Mutex<Answer>` handle so a single domain's resolved IPs can
/// change between successive `Observer::check` calls within one tick
/// sequence, just as a real DoH answer would drift over time.
struct StubResolver {
    ips: Mutex<Vec<&'static str>>,
    ttl: u32,
    serial: &'static str,
}

impl StubResolver {
    fn new(ips: Vec<&'static str>, ttl: u32, serial: &'static str) -> Self {
        Self { ips: Mutex::new(ips), ttl, serial }
    }

    fn set_ips(&self, ips: Vec<&'static str>) {
        *self.ips.lock().unwrap() = ips;
    }
}

#[async_trait]
impl Resolver for StubResolver {
    async fn resolve(&self, _fqdn: &Fqdn) -> Result<ResolveResult, DomainError> {
        let ips = self.ips.lock().unwrap().clone();
        Ok(ResolveResult {
            a_records: ips.iter().map(|ip| ARecord { ip: ip.to_string(), ttl: self.ttl }).collect(),
            soa: Some(SoaRecord {
                primary_ns: "ns1.example.com".to_string(),
                admin_email: "admin.example.com".to_string(),
                serial: self.serial.to_string(),
                refresh: 3600,
                retry: 600,
                expire: 604_800,
                min_ttl: self.ttl,
            }),
            status: 0,
            no_authority: false,
            comments: Vec::new(),
        })
    }
}

struct RecordingNotifier {
    emitted: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    fn new() -> Self {
        Self { emitted: Mutex::new(Vec::new()) }
    }

    fn titles(&self) -> Vec<String> {
        self.emitted.lock().unwrap().iter().map(|n| n.title.clone()).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn emit(&self, notification: &Notification) -> Result<(), DomainError> {
        self.emitted.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

fn harness() -> (Arc<DomainStateRepo>, Arc<RecordingNotifier>) {
    let store = Arc::new(MemoryStore::new());
    (Arc::new(DomainStateRepo::new(store)), Arc::new(RecordingNotifier::new()))
}

fn observer(repo: Arc<DomainStateRepo>, resolver: Arc<StubResolver>, notifier: Arc<RecordingNotifier>) -> Observer {
    Observer::new(repo, resolver, notifier)
}

// Scenario 1: first sight, no notification.
#[tokio::test]
async fn first_sight_no_notification() {
    let (repo, notifier) = harness();
    let resolver = Arc::new(StubResolver::new(vec!["1.2.3.4"], 3600, "2024010101"));
    let observer = observer(repo.clone(), resolver, notifier.clone());
    let fqdn = Fqdn::parse("first.example.com").unwrap();

    observer.check(&fqdn).await.unwrap();

    assert!(notifier.emitted.lock().unwrap().is_empty());
    let state = repo.load(&fqdn).await.unwrap();
    assert_eq!(state.state, DomainState::Resolved);
    assert_eq!(state.last_ips.to_csv(), "1.2.3.4");
    assert_eq!(state.last_serial.as_deref(), Some("2024010101"));
}

// Scenario 2: business-hours complete change escalates to critical, with
// an 18-minute dampening period. Temporal context depends on the wall
// clock, so this composes the pure analyzer stages directly against a
// fixed instant rather than driving them through `Observer`.
#[test]
fn business_hours_complete_change_is_critical_with_eighteen_minute_period() {
    let now: DateTime<Utc> = Utc.with_ymd_and_hms(2026, 7, 28, 10, 0, 0).unwrap();
    let temporal = temporal_context(now);
    assert!(temporal.is_business_hours);

    let previous = SortedIpSet::new(vec!["5.5.5.5".to_string()]);
    let current = SortedIpSet::new(vec!["9.9.9.9".to_string()]);
    let change = classify_change(&previous, &current, 3600, &temporal, now);
    assert_eq!(change.severity, dns_sentinel_domain::Severity::Critical);

    let cdn = detect_cdn(&current);
    assert!(!cdn.is_any_cdn);
    let lb = LbResult::unknown();

    let inputs = DampeningInputs {
        change: &change,
        cdn: &cdn,
        lb: &lb,
        temporal: &temporal,
        changes_in_last_hour: 0,
        oscillation_seen: false,
        auto_suppressed_until: None,
        last_notification_at: None,
    };
    let outcome = calculate_dampening(&inputs, now);
    assert_eq!(outcome.result.period_ms, 18 * 60 * 1000);

    let coordination = CoordinationResult::none();
    let fqdn = Fqdn::parse("critical.example.com").unwrap();
    let notification_inputs = NotificationInputs {
        domain: &fqdn,
        previous_ips: &previous,
        current_ips: &current,
        change: &change,
        cdn: &cdn,
        lb: &lb,
        temporal: &temporal,
        coordination: &coordination,
        soa: None,
    };
    let notification = build_notification(&notification_inputs);
    assert_eq!(notification.title, "Critical DNS Change Detected");
    assert_eq!(notification.severity_color, dns_sentinel_domain::SeverityColor::Red);
}

// Scenario 3: Cloudflare round-robin oscillation gets suppressed under
// the 2-hour override once the pattern has been seen six times.
#[tokio::test]
async fn cloudflare_round_robin_oscillation_is_suppressed() {
    let (repo, notifier) = harness();
    let resolver = Arc::new(StubResolver::new(vec!["104.16.0.1", "104.16.0.2"], 60, "100"));
    let observer = observer(repo.clone(), resolver.clone(), notifier.clone());
    let fqdn = Fqdn::parse("cdn.example.com").unwrap();

    observer.check(&fqdn).await.unwrap();

    let set_a = vec!["104.16.0.1", "104.16.0.2"];
    let set_b = vec!["104.16.0.3", "104.16.0.4"];
    for cycle in 0..6 {
        let ips = if cycle % 2 == 0 { set_b.clone() } else { set_a.clone() };
        resolver.set_ips(ips);
        observer.check(&fqdn).await.unwrap();
    }

    let state = repo.load(&fqdn).await.unwrap();
    let lb = analyze_load_balancer(&state.recent_ip_history, Utc::now());
    assert!(lb.is_load_balancer);
    assert_eq!(lb.pattern, dns_sentinel_domain::LbPattern::RoundRobin);

    let cdn = detect_cdn(&state.last_ips);
    assert!(cdn.confidence >= 0.5);

    // The 7th cycle repeats a signature already seen within the window —
    // the oscillation override should suppress rather than emit.
    resolver.set_ips(set_a.clone());
    observer.check(&fqdn).await.unwrap();
    let emitted_before = notifier.emitted.lock().unwrap().len();
    resolver.set_ips(set_b.clone());
    observer.check(&fqdn).await.unwrap();
    let emitted_after = notifier.emitted.lock().unwrap().len();
    assert_eq!(emitted_before, emitted_after, "oscillating signature should be dampened, not re-notified");
}

// Scenario 4: failover during business hours yields a 3min36s period
// and the failover title. Pure analyzer composition with a fixed clock,
// since failover classification depends on explicit IP-history gaps the
// Resolver stub cannot express on its own.
#[test]
fn failover_during_business_hours_clamps_to_three_minutes_thirty_six_seconds() {
    let now: DateTime<Utc> = Utc.with_ymd_and_hms(2026, 7, 28, 14, 0, 0).unwrap();
    let history = vec![
        IpHistoryEntry { ips: SortedIpSet::new(vec!["1.1.1.1".into()]), at: now - chrono::Duration::minutes(50) },
        IpHistoryEntry { ips: SortedIpSet::new(vec!["1.1.1.1".into()]), at: now - chrono::Duration::minutes(49) },
        IpHistoryEntry { ips: SortedIpSet::new(vec!["2.2.2.2".into()]), at: now - chrono::Duration::minutes(48) },
        IpHistoryEntry { ips: SortedIpSet::new(vec!["2.2.2.2".into()]), at: now - chrono::Duration::minutes(1) },
    ];
    let lb = analyze_load_balancer(&history, now);
    assert_eq!(lb.pattern, dns_sentinel_domain::LbPattern::Failover);
    assert_eq!(lb.confidence, 0.6);

    let temporal = temporal_context(now);
    assert!(temporal.is_business_hours);

    let previous = SortedIpSet::new(vec!["1.1.1.1".to_string()]);
    let current = SortedIpSet::new(vec!["2.2.2.2".to_string()]);
    let change = classify_change(&previous, &current, 300, &temporal, now);
    assert_eq!(change.severity, dns_sentinel_domain::Severity::High);

    let cdn = CdnInfo::none();
    let inputs = DampeningInputs {
        change: &change,
        cdn: &cdn,
        lb: &lb,
        temporal: &temporal,
        changes_in_last_hour: 0,
        oscillation_seen: false,
        auto_suppressed_until: None,
        last_notification_at: None,
    };
    let outcome = calculate_dampening(&inputs, now);
    assert_eq!(outcome.result.period_ms, 216_000);

    let coordination = CoordinationResult::none();
    let fqdn = Fqdn::parse("failover.example.com").unwrap();
    let notification_inputs = NotificationInputs {
        domain: &fqdn,
        previous_ips: &previous,
        current_ips: &current,
        change: &change,
        cdn: &cdn,
        lb: &lb,
        temporal: &temporal,
        coordination: &coordination,
        soa: None,
    };
    let notification = build_notification(&notification_inputs);
    assert_eq!(notification.title, "Load Balancer Failover Detected");
}

// Scenario 5: six changes within the last hour with an LB already
// detected cross the threshold of 3 and trigger auto-suppression, with
// subsequent changes silently swallowed for the following window.
#[tokio::test]
async fn auto_suppression_triggers_and_silences_subsequent_changes() {
    let (repo, notifier) = harness();
    let resolver = Arc::new(StubResolver::new(vec!["104.16.0.1", "104.16.0.2"], 60, "1"));
    let observer = observer(repo.clone(), resolver.clone(), notifier.clone());
    let fqdn = Fqdn::parse("flapping.example.com").unwrap();

    observer.check(&fqdn).await.unwrap();

    let set_a = vec!["104.16.0.1", "104.16.0.2"];
    let set_b = vec!["104.16.0.3", "104.16.0.4"];
    for cycle in 0..7 {
        let ips = if cycle % 2 == 0 { set_b.clone() } else { set_a.clone() };
        resolver.set_ips(ips);
        observer.check(&fqdn).await.unwrap();
    }

    let titles = notifier.titles();
    assert!(
        titles.iter().any(|t| t == "DNS Change Notifications Auto-Suppressed"),
        "expected an auto-suppression notice among: {titles:?}"
    );

    let emitted_before = notifier.emitted.lock().unwrap().len();
    resolver.set_ips(set_a.clone());
    observer.check(&fqdn).await.unwrap();
    let emitted_after = notifier.emitted.lock().unwrap().len();
    assert_eq!(emitted_before, emitted_after, "changes within the auto-suppression window must be silent");
}

// Scenario 6: three sibling FQDNs under one parent change within minutes
// and share IP overlap — the coordinated-change path fires, severity is
// elevated, and an LB pattern is synthesized even though none of the
// three domains has enough individual history to detect one on its own.
#[tokio::test]
async fn coordinated_platform_change_is_detected_across_siblings() {
    let (repo, notifier) = harness();

    let shared_ips = vec!["203.0.113.10", "203.0.113.11"];
    let domains = ["api.example.com", "cdn.example.com", "auth.example.com"];

    for (i, domain) in domains.iter().enumerate() {
        let fqdn = Fqdn::parse(domain).unwrap();
        let resolver = Arc::new(StubResolver::new(vec!["198.51.100.1"], 300, "1"));
        let obs = observer(repo.clone(), resolver.clone(), notifier.clone());
        obs.check(&fqdn).await.unwrap();

        resolver.set_ips(vec![shared_ips[i % shared_ips.len()], shared_ips[(i + 1) % shared_ips.len()]]);
        obs.check(&fqdn).await.unwrap();
    }

    let titles = notifier.titles();
    assert!(
        titles.iter().any(|t| t == "Coordinated Infrastructure Change Detected"),
        "expected a coordinated-change notice among: {titles:?}"
    );
}

// Invariant: dampening calculator output is always clamped to [1 min, 4 h].
#[test]
fn dampening_output_is_always_clamped() {
    let now = Utc::now();
    let temporal = temporal_context(now);
    let extreme_ttl_cases = [0u32, 1, 59, 60, 299, 300, 899, 900, 100_000];
    for ttl in extreme_ttl_cases {
        let change = classify_change(
            &SortedIpSet::new(vec!["1.1.1.1".into()]),
            &SortedIpSet::new(vec!["2.2.2.2".into()]),
            ttl,
            &temporal,
            now,
        );
        let cdn = CdnInfo::none();
        let lb = LbResult::unknown();
        let inputs = DampeningInputs {
            change: &change,
            cdn: &cdn,
            lb: &lb,
            temporal: &temporal,
            changes_in_last_hour: 0,
            oscillation_seen: false,
            auto_suppressed_until: None,
            last_notification_at: None,
        };
        let outcome = calculate_dampening(&inputs, now);
        assert!(outcome.result.period_ms >= 60_000, "ttl={ttl} period={}", outcome.result.period_ms);
        assert!(outcome.result.period_ms <= 4 * 60 * 60 * 1000, "ttl={ttl} period={}", outcome.result.period_ms);
    }
}
