use chrono::{DateTime, Duration, Utc};
use dns_sentinel_domain::{
    clamp_period, CdnInfo, ChangeContext, DampeningResult, LbPattern, LbResult, NotifyDecision,
    Severity, TemporalContext,
};

const AUTO_SUPPRESSION_WINDOW: Duration = Duration::hours(4);

/// Input bundle for `calculate_dampening` — everything the calculator
/// needs besides the wall clock (spec §4.8).
pub struct DampeningInputs<'a> {
    pub change: &'a ChangeContext,
    pub cdn: &'a CdnInfo,
    pub lb: &'a LbResult,
    pub temporal: &'a TemporalContext,
    pub changes_in_last_hour: usize,
    pub oscillation_seen: bool,
    pub auto_suppressed_until: Option<DateTime<Utc>>,
    pub last_notification_at: Option<DateTime<Utc>>,
}

/// Result of one dampening evaluation, including the new
/// `auto_suppressed_until` value the caller must persist (the ambient
/// supplement described in `MonitoredState`).
pub struct DampeningOutcome {
    pub result: DampeningResult,
    pub new_auto_suppressed_until: Option<DateTime<Utc>>,
}

fn base_period_ms(ttl_secs: u32) -> f64 {
    let ttl_ms = ttl_secs as f64 * 1000.0;
    if ttl_secs < 60 {
        20.0 * 60_000.0
    } else if ttl_secs <= 300 {
        15.0 * 60_000.0
    } else if ttl_secs < 900 {
        (2.0 * ttl_ms).max(5.0 * 60_000.0)
    } else {
        ttl_ms.max(5.0 * 60_000.0)
    }
}

fn multiplier(
    change: &ChangeContext,
    cdn: &CdnInfo,
    lb: &LbResult,
    temporal: &TemporalContext,
    changes_in_last_hour: usize,
) -> f64 {
    let mut m = 1.0;

    if cdn.is_any_cdn {
        m *= if cdn.confidence > 0.8 { 2.0 } else { 1.5 };
    }

    if lb.is_load_balancer {
        m *= match lb.pattern {
            LbPattern::RoundRobin => 3.0,
            LbPattern::Weighted => 2.0,
            LbPattern::Failover => 0.5,
            LbPattern::Geographic | LbPattern::Unknown => 1.5,
        };
    }

    if temporal.is_maintenance_window {
        m *= 1.5;
    }
    if temporal.is_business_hours {
        m *= 0.8;
    }

    m *= match change.severity {
        Severity::Critical => 0.3,
        Severity::High => 0.6,
        Severity::Low => 2.0,
        Severity::Medium => 1.0,
    };

    if changes_in_last_hour >= 5 {
        m *= 4.0;
    } else if changes_in_last_hour >= 3 {
        m *= 2.0;
    }

    m
}

/// Combines all analyzer signals into a final dampening interval and
/// notify decision (spec §4.8).
pub fn calculate_dampening(inputs: &DampeningInputs, now: DateTime<Utc>) -> DampeningOutcome {
    if let Some(until) = inputs.auto_suppressed_until {
        if now < until {
            return DampeningOutcome {
                result: DampeningResult {
                    period_ms: (until - now).num_milliseconds().max(0),
                    decision: NotifyDecision::AutoSuppressed,
                    oscillation_override: false,
                },
                new_auto_suppressed_until: Some(until),
            };
        }
    }

    let threshold = if inputs.lb.is_load_balancer { 3 } else { 5 };
    if inputs.changes_in_last_hour >= threshold {
        return DampeningOutcome {
            result: DampeningResult {
                period_ms: clamp_period(AUTO_SUPPRESSION_WINDOW.num_milliseconds() as f64),
                decision: NotifyDecision::AutoSuppressionNotice,
                oscillation_override: false,
            },
            new_auto_suppressed_until: Some(now + AUTO_SUPPRESSION_WINDOW),
        };
    }

    let (period_ms, oscillation_override) = if inputs.oscillation_seen {
        let ms = if inputs.cdn.is_any_cdn || inputs.lb.is_load_balancer {
            2 * 60 * 60 * 1000
        } else {
            30 * 60 * 1000
        };
        (ms, true)
    } else {
        let base = base_period_ms(inputs.change.ttl_secs);
        let m = multiplier(
            inputs.change,
            inputs.cdn,
            inputs.lb,
            inputs.temporal,
            inputs.changes_in_last_hour,
        );
        (clamp_period(base * m), false)
    };
    let period_ms = clamp_period(period_ms as f64);

    let decision = match inputs.last_notification_at {
        Some(last) if (now - last).num_milliseconds() < period_ms => NotifyDecision::Suppress,
        _ => NotifyDecision::Emit,
    };

    DampeningOutcome {
        result: DampeningResult {
            period_ms,
            decision,
            oscillation_override,
        },
        new_auto_suppressed_until: None,
    }
}
