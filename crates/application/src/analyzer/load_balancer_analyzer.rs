use chrono::{DateTime, Duration, Utc};
use dns_sentinel_domain::{IpHistoryEntry, LbPattern, LbResult};

const LOOKBACK: Duration = Duration::hours(1);

/// Classifies recent IP-set history into a load-balancer rotation
/// pattern (spec §4.4). Pure function over the domain's `recent_ip_history`
/// — no store access, so it composes freely with the rest of the pipeline.
pub fn analyze_load_balancer(history: &[IpHistoryEntry], now: DateTime<Utc>) -> LbResult {
    let horizon = now - LOOKBACK;
    let recent: Vec<&IpHistoryEntry> = history.iter().filter(|e| e.at >= horizon).collect();

    if recent.len() < 3 {
        return LbResult::unknown();
    }

    let mut signatures: Vec<String> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();
    for entry in &recent {
        let sig = entry.ips.to_csv();
        match signatures.iter().position(|s| *s == sig) {
            Some(idx) => counts[idx] += 1,
            None => {
                signatures.push(sig);
                counts.push(1);
            }
        }
    }
    let n = recent.len();
    let u = signatures.len();

    if n >= 5 && (2..=3).contains(&u) {
        return LbResult {
            is_load_balancer: true,
            pattern: LbPattern::RoundRobin,
            confidence: 0.8,
            analysis_text: format!(
                "{n} resolutions in the last hour cycling across {u} distinct IP sets"
            ),
        };
    }

    if u != 1 && (2..=4).contains(&u) {
        let mut sorted_counts = counts.clone();
        sorted_counts.sort_unstable_by(|a, b| b.cmp(a));
        let top = sorted_counts[0] as f64;
        let second = sorted_counts.get(1).copied().unwrap_or(0) as f64;
        if second > 0.0 && top > second * 1.5 {
            return LbResult {
                is_load_balancer: true,
                pattern: LbPattern::Weighted,
                confidence: 0.7,
                analysis_text: format!(
                    "dominant IP set seen {top:.0}x vs {second:.0}x for the next most common across {u} sets"
                ),
            };
        }
    }

    if u <= 2 {
        let gaps: Vec<i64> = recent
            .windows(2)
            .map(|w| (w[1].at - w[0].at).num_seconds())
            .collect();
        // Compare each gap against the mean of the *other* gaps rather than
        // the whole set — a single outlier can never exceed 3x a mean that
        // already includes it.
        let has_outlier_gap = gaps.len() > 1
            && gaps.iter().enumerate().any(|(i, g)| {
                let rest: i64 = gaps.iter().enumerate().filter(|(j, _)| *j != i).map(|(_, v)| *v).sum();
                let rest_mean = rest as f64 / (gaps.len() - 1) as f64;
                rest_mean > 0.0 && *g as f64 > rest_mean * 3.0
            });
        if has_outlier_gap {
            return LbResult {
                is_load_balancer: true,
                pattern: LbPattern::Failover,
                confidence: 0.6,
                analysis_text: "irregular resolution gap consistent with failover behavior"
                    .to_string(),
            };
        }
    }

    LbResult::unknown()
}
