use crate::ports::SoaRecord;
use dns_sentinel_domain::{
    CdnInfo, ChangeContext, ChangeType, CoordinationResult, Fqdn, LbPattern, LbResult,
    Notification, NotificationField, NotificationKind, SeverityColor, SortedIpSet,
    TemporalContext,
};

/// Everything `build_notification` needs to render a change event. A
/// pure function of its inputs (spec §4.9) — no I/O.
pub struct NotificationInputs<'a> {
    pub domain: &'a Fqdn,
    pub previous_ips: &'a SortedIpSet,
    pub current_ips: &'a SortedIpSet,
    pub change: &'a ChangeContext,
    pub cdn: &'a CdnInfo,
    pub lb: &'a LbResult,
    pub temporal: &'a TemporalContext,
    pub coordination: &'a CoordinationResult,
    pub soa: Option<&'a SoaRecord>,
}

fn select_title(inputs: &NotificationInputs) -> &'static str {
    if inputs.coordination.is_coordinated {
        "Coordinated Infrastructure Change Detected"
    } else if inputs.change.severity == dns_sentinel_domain::Severity::Critical {
        "Critical DNS Change Detected"
    } else if inputs.lb.pattern == LbPattern::Failover {
        "Load Balancer Failover Detected"
    } else if inputs.cdn.is_any_cdn {
        "CDN Configuration Change"
    } else if inputs.temporal.is_maintenance_window {
        "DNS Change During Maintenance Window"
    } else if inputs.change.change_type == ChangeType::CompleteChange {
        "Complete IP Address Change"
    } else {
        "DNS Change Detected"
    }
}

fn recommended_actions(inputs: &NotificationInputs) -> Vec<String> {
    let mut actions = Vec::new();

    match inputs.change.severity {
        dns_sentinel_domain::Severity::Critical => {
            actions.push("Verify the new IP addresses are expected before escalating".to_string());
        }
        dns_sentinel_domain::Severity::High => {
            actions.push("Confirm service availability at the new record set".to_string());
        }
        _ => {}
    }

    if inputs.lb.pattern == LbPattern::Failover {
        actions.push("Check upstream health for the failed-over endpoint".to_string());
    }

    if inputs.cdn.is_any_cdn {
        actions.push(format!(
            "No action likely needed — matches known {} ranges",
            inputs.cdn.provider.unwrap_or("CDN")
        ));
    }

    if inputs.temporal.is_maintenance_window {
        actions.push("Likely scheduled maintenance — confirm with the infra calendar".to_string());
    }

    if inputs.change.change_type == ChangeType::CompleteChange {
        actions.push("Complete IP replacement — validate TLS certificate coverage".to_string());
    }

    if inputs.coordination.is_coordinated {
        actions.push(format!(
            "Review sibling domains for a coordinated platform event: {}",
            inputs
                .coordination
                .related_domains
                .iter()
                .map(|d| d.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    if actions.is_empty() {
        actions.push("Monitor for recurrence".to_string());
    }

    actions
}

/// Produces the structured change notification (spec §4.9).
pub fn build_notification(inputs: &NotificationInputs) -> Notification {
    let title = select_title(inputs);
    let severity_color = SeverityColor::from(inputs.change.severity);

    let mut fields = vec![
        NotificationField::new("Domain", inputs.domain.as_str()),
        NotificationField::new("Previous IPs", inputs.previous_ips.to_csv()),
        NotificationField::new("Current IPs", inputs.current_ips.to_csv()),
        NotificationField::new("Change Type", format!("{:?}", inputs.change.change_type)),
        NotificationField::new("Severity", format!("{:?}", inputs.change.severity)),
        NotificationField::new("TTL", format!("{}s", inputs.change.ttl_secs)),
        NotificationField::new("Time Pattern", format!("{:?}", inputs.temporal.time_pattern)),
    ];

    if inputs.cdn.is_any_cdn {
        fields.push(NotificationField::new(
            "CDN",
            format!(
                "{} (confidence {:.2})",
                inputs.cdn.provider.unwrap_or("unknown"),
                inputs.cdn.confidence
            ),
        ));
    }

    if inputs.lb.is_load_balancer {
        fields.push(NotificationField::new(
            "Load Balancer",
            format!("{:?} (confidence {:.2}) — {}", inputs.lb.pattern, inputs.lb.confidence, inputs.lb.analysis_text),
        ));
    }

    if inputs.coordination.is_coordinated {
        fields.push(NotificationField::new(
            "Coordinated Change",
            format!("score {:.2} — {}", inputs.coordination.score, inputs.coordination.analysis_text),
        ));
    }

    if let Some(soa) = inputs.soa {
        fields.push(NotificationField::new(
            "SOA",
            format!("serial {} via {}", soa.serial, soa.primary_ns),
        ));
    }

    Notification {
        kind_label: format!("{:?}", NotificationKind::Change),
        title: title.to_string(),
        severity_color,
        fields,
        actions: recommended_actions(inputs),
    }
}

/// The distinct auto-suppression path (spec §4.8/§4.9).
pub fn build_auto_suppression_notice(domain: &Fqdn, changes_in_last_hour: usize) -> Notification {
    Notification {
        kind_label: format!("{:?}", NotificationKind::AutoSuppression),
        title: "DNS Change Notifications Auto-Suppressed".to_string(),
        severity_color: SeverityColor::Gray,
        fields: vec![
            NotificationField::new("Domain", domain.as_str()),
            NotificationField::new("Changes In Last Hour", changes_in_last_hour.to_string()),
            NotificationField::new("Suppression Window", "4 hours"),
        ],
        actions: vec!["Further changes will be silenced for 4 hours".to_string()],
    }
}
