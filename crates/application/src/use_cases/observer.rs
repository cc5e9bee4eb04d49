use std::sync::Arc;

use chrono::{Duration, Utc};
use dns_sentinel_domain::{
    BotStatus, DomainError, DomainState, Fqdn, GlobalChangeEntry, Notification,
    NotificationField, NotificationKind, SeverityColor, SortedIpSet,
};
use tracing::{instrument, warn};

use crate::analyzer::{
    build_auto_suppression_notice, build_notification, calculate_dampening, classify_change,
    detect_cdn, detect_coordination, temporal_context, DampeningInputs, NotificationInputs,
};
use crate::ports::{Notifier, Resolver};
use crate::repo::DomainStateRepo;
use dns_sentinel_domain::NotifyDecision;

/// Runs one per-domain observation tick end to end (spec §4.10):
/// resolve, diff against persisted state, run the change analyzer, and
/// persist plus notify as the pipeline decides.
pub struct Observer {
    repo: Arc<DomainStateRepo>,
    resolver: Arc<dyn Resolver>,
    notifier: Arc<dyn Notifier>,
}

impl Observer {
    pub fn new(
        repo: Arc<DomainStateRepo>,
        resolver: Arc<dyn Resolver>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self { repo, resolver, notifier }
    }

    #[instrument(skip(self))]
    pub async fn check(&self, fqdn: &Fqdn) -> Result<(), DomainError> {
        let resolved = match self.resolver.resolve(fqdn).await {
            Ok(r) => r,
            Err(err) => {
                warn!(domain = fqdn.as_str(), error = %err, "resolve failed, emitting error notification");
                self.emit_best_effort(&error_notification(fqdn, &err)).await;
                return Ok(());
            }
        };

        if resolved.no_authority {
            let state = self.repo.load(fqdn).await?;
            if state.state != DomainState::NoAuthority {
                self.emit_best_effort(&authority_unreachable_notification(fqdn)).await;
                self.repo.write_state_only(fqdn, DomainState::NoAuthority).await?;
            }
            return Ok(());
        }

        let current_ips = SortedIpSet::new(resolved.a_records.iter().map(|r| r.ip.clone()).collect());
        let serial_opt = resolved.soa.as_ref().map(|s| s.serial.clone());
        let serial = serial_opt.clone().unwrap_or_default();

        let mut state = self.repo.load(fqdn).await?;

        if state.state == DomainState::Unseen {
            self.repo
                .write_resolution(fqdn, DomainState::Resolved, &current_ips, &serial)
                .await?;
            return Ok(());
        }

        if current_ips != state.last_ips {
            self.repo
                .write_resolution(fqdn, DomainState::Resolved, &current_ips, &serial)
                .await?;

            let now = Utc::now();
            let temporal = temporal_context(now);
            let cdn = detect_cdn(&current_ips);
            let ttl = resolved.min_ttl();
            let mut change = classify_change(&state.last_ips, &current_ips, ttl, &temporal, now);
            let mut lb = crate::analyzer::analyze_load_balancer(&state.recent_ip_history, now);

            self.repo
                .append_global_change(now, GlobalChangeEntry::new(fqdn, current_ips.clone(), now))
                .await?;
            let related_entries = self.repo.recent_global_changes(now).await?;
            let coordination = detect_coordination(fqdn, &current_ips, &related_entries);

            if coordination.is_coordinated && lb.pattern == dns_sentinel_domain::LbPattern::Unknown {
                lb = dns_sentinel_domain::LbResult {
                    is_load_balancer: true,
                    pattern: dns_sentinel_domain::LbPattern::RoundRobin,
                    confidence: coordination.score,
                    analysis_text: coordination.analysis_text.clone(),
                };
                if change.severity < dns_sentinel_domain::Severity::High {
                    change.severity = dns_sentinel_domain::Severity::High;
                }
            }

            let oscillation_seen = state.has_seen_signature_within(&current_ips, now, Duration::days(1));
            state.push_ip_history(current_ips.clone(), now);
            let changes_in_last_hour = state.changes_within(now, Duration::hours(1));

            let dampening_inputs = DampeningInputs {
                change: &change,
                cdn: &cdn,
                lb: &lb,
                temporal: &temporal,
                changes_in_last_hour,
                oscillation_seen,
                auto_suppressed_until: state.auto_suppressed_until,
                last_notification_at: state.last_notification_at,
            };
            let outcome = calculate_dampening(&dampening_inputs, now);

            let new_last_notification_at = match outcome.result.decision {
                NotifyDecision::Emit | NotifyDecision::AutoSuppressionNotice => Some(now),
                NotifyDecision::Suppress | NotifyDecision::AutoSuppressed => state.last_notification_at,
            };

            self.repo
                .write_notification_tracking(
                    fqdn,
                    new_last_notification_at,
                    &state.recent_ip_history,
                    outcome.new_auto_suppressed_until,
                )
                .await?;

            match outcome.result.decision {
                NotifyDecision::Emit => {
                    let notification_inputs = NotificationInputs {
                        domain: fqdn,
                        previous_ips: &state.last_ips,
                        current_ips: &current_ips,
                        change: &change,
                        cdn: &cdn,
                        lb: &lb,
                        temporal: &temporal,
                        coordination: &coordination,
                        soa: resolved.soa.as_ref(),
                    };
                    self.emit_best_effort(&build_notification(&notification_inputs)).await;
                }
                NotifyDecision::AutoSuppressionNotice => {
                    self.emit_best_effort(&build_auto_suppression_notice(fqdn, changes_in_last_hour))
                        .await;
                }
                NotifyDecision::Suppress | NotifyDecision::AutoSuppressed => {}
            }

            return Ok(());
        }

        if serial_opt != state.last_serial {
            self.repo.write_serial(fqdn, &serial).await?;
            self.emit_best_effort(&zone_updated_notification(fqdn, &serial)).await;
        }

        Ok(())
    }

    async fn emit_best_effort(&self, notification: &Notification) {
        if let Err(err) = self.notifier.emit(notification).await {
            warn!(error = %err, "notifier emit failed, dampening timestamp still stands");
        }
    }

    /// Emits the one-shot `NewDeployment` notice the scheduler sends when
    /// the host-provided version string changes (spec §4.11).
    #[instrument(skip(self))]
    pub async fn emit_deployment_notice(&self, version: &str) {
        self.emit_best_effort(&deployment_notification(version)).await;
    }

    /// Publishes aggregate bot status after a scheduler tick (spec §4.11
    /// / §6 `bot:status`). Called by `SentinelJob`, not per-domain.
    #[instrument(skip(self))]
    pub async fn publish_bot_status(&self, domains_monitored: usize) -> Result<(), DomainError> {
        self.repo
            .set_bot_status(&BotStatus {
                online: true,
                last_check: Utc::now(),
                domains_monitored,
                activity: "scanning".to_string(),
                updated_at: Utc::now(),
            })
            .await
    }
}

fn error_notification(fqdn: &Fqdn, err: &DomainError) -> Notification {
    Notification {
        kind_label: format!("{:?}", NotificationKind::ErrorMonitoring),
        title: "DNS Monitoring Error".to_string(),
        severity_color: SeverityColor::Gray,
        fields: vec![
            NotificationField::new("Domain", fqdn.as_str()),
            NotificationField::new("Error", err.to_string()),
        ],
        actions: vec!["Check resolver connectivity".to_string()],
    }
}

fn authority_unreachable_notification(fqdn: &Fqdn) -> Notification {
    Notification {
        kind_label: format!("{:?}", NotificationKind::DnsAuthorityUnreachable),
        title: "DNS Authority Unreachable".to_string(),
        severity_color: SeverityColor::Orange,
        fields: vec![NotificationField::new("Domain", fqdn.as_str())],
        actions: vec!["Verify the domain's nameservers are still delegated correctly".to_string()],
    }
}

fn deployment_notification(version: &str) -> Notification {
    Notification {
        kind_label: format!("{:?}", NotificationKind::NewDeployment),
        title: "New Deployment Detected".to_string(),
        severity_color: SeverityColor::Blue,
        fields: vec![NotificationField::new("Version", version)],
        actions: vec!["Monitoring resumed under the new deployment".to_string()],
    }
}

fn zone_updated_notification(fqdn: &Fqdn, serial: &str) -> Notification {
    Notification {
        kind_label: format!("{:?}", NotificationKind::DnsZoneUpdated),
        title: "DNS Zone Updated".to_string(),
        severity_color: SeverityColor::Blue,
        fields: vec![
            NotificationField::new("Domain", fqdn.as_str()),
            NotificationField::new("New Serial", serial),
        ],
        actions: vec!["No IP change — zone metadata only".to_string()],
    }
}
