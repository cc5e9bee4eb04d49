use chrono::{DateTime, TimeZone, Utc};
use dns_sentinel_domain::{
    global_change_bucket::{bucket_key, BUCKET_TTL_SECS},
    DomainError, DomainState, Fqdn, GlobalChangeEntry, IpHistoryEntry, MonitoredState,
    SortedIpSet,
};
use serde_json;
use std::sync::Arc;
use tracing::{instrument, warn};

use crate::ports::Store;

/// Typed view over `Store`, implementing the bit-exact keyspace of
/// spec §6. Write ordering within one tick follows spec §4.2: state,
/// then IPs, then serial, then notification tracking.
pub struct DomainStateRepo {
    store: Arc<dyn Store>,
}

impl DomainStateRepo {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn load(&self, fqdn: &Fqdn) -> Result<MonitoredState, DomainError> {
        let key_prefix = fqdn.as_str();

        let state = match self.store.get(&format!("dns:{key_prefix}:state")).await? {
            Some(s) => DomainState::parse(&s).unwrap_or_else(|| {
                warn!(domain = key_prefix, raw = %s, "corrupt dns:state value, treating as unseen");
                DomainState::Unseen
            }),
            None => DomainState::Unseen,
        };

        let last_ips = match self.store.get(&format!("dns:{key_prefix}:ips")).await? {
            Some(csv) => SortedIpSet::from_csv(&csv),
            None => SortedIpSet::empty(),
        };

        let last_serial = self.store.get(&format!("dns:{key_prefix}:serial")).await?;

        let last_notification_at = self
            .store
            .get(&format!("notify:{key_prefix}:last"))
            .await?
            .and_then(|raw| raw.parse::<i64>().ok())
            .and_then(ms_to_datetime);

        let auto_suppressed_until = self
            .store
            .get(&format!("notify:{key_prefix}:auto_suppressed_until"))
            .await?
            .and_then(|raw| raw.parse::<i64>().ok())
            .and_then(ms_to_datetime);

        let recent_ip_history = match self
            .store
            .get(&format!("notify:{key_prefix}:recent_ips"))
            .await?
        {
            Some(raw) => parse_recent_ips(&raw, key_prefix),
            None => Vec::new(),
        };

        Ok(MonitoredState {
            state,
            last_ips,
            last_serial,
            last_notification_at,
            recent_ip_history,
            auto_suppressed_until,
        })
    }

    /// Writes `state`, `ips` and `serial` in that order — the atomic-ish
    /// transition described in spec §3/§4.2.
    #[instrument(skip(self, ips))]
    pub async fn write_resolution(
        &self,
        fqdn: &Fqdn,
        state: DomainState,
        ips: &SortedIpSet,
        serial: &str,
    ) -> Result<(), DomainError> {
        let p = fqdn.as_str();
        self.store
            .set(&format!("dns:{p}:state"), state.as_str().to_string())
            .await?;
        self.store
            .set(&format!("dns:{p}:ips"), ips.to_csv())
            .await?;
        self.store
            .set(&format!("dns:{p}:serial"), serial.to_string())
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn write_state_only(&self, fqdn: &Fqdn, state: DomainState) -> Result<(), DomainError> {
        self.store
            .set(&format!("dns:{}:state", fqdn.as_str()), state.as_str().to_string())
            .await
    }

    #[instrument(skip(self))]
    pub async fn write_serial(&self, fqdn: &Fqdn, serial: &str) -> Result<(), DomainError> {
        self.store
            .set(&format!("dns:{}:serial", fqdn.as_str()), serial.to_string())
            .await
    }

    #[instrument(skip(self, history))]
    pub async fn write_notification_tracking(
        &self,
        fqdn: &Fqdn,
        last_notification_at: Option<DateTime<Utc>>,
        history: &[IpHistoryEntry],
        auto_suppressed_until: Option<DateTime<Utc>>,
    ) -> Result<(), DomainError> {
        let p = fqdn.as_str();
        if let Some(at) = last_notification_at {
            self.store
                .set(&format!("notify:{p}:last"), at.timestamp_millis().to_string())
                .await?;
        }
        match auto_suppressed_until {
            Some(until) => {
                self.store
                    .set(
                        &format!("notify:{p}:auto_suppressed_until"),
                        until.timestamp_millis().to_string(),
                    )
                    .await?;
            }
            None => {
                self.store
                    .delete(&format!("notify:{p}:auto_suppressed_until"))
                    .await?;
            }
        }
        let serialized = serialize_recent_ips(history);
        self.store
            .set(&format!("notify:{p}:recent_ips"), serialized)
            .await?;
        Ok(())
    }

    /// Deletes all keys for `fqdn` (spec §3 Lifecycle: Destroyed).
    #[instrument(skip(self))]
    pub async fn delete_all(&self, fqdn: &Fqdn) -> Result<(), DomainError> {
        let p = fqdn.as_str();
        for key in [
            format!("dns:{p}:state"),
            format!("dns:{p}:ips"),
            format!("dns:{p}:serial"),
            format!("notify:{p}:last"),
            format!("notify:{p}:recent_ips"),
            format!("notify:{p}:auto_suppressed_until"),
        ] {
            self.store.delete(&key).await?;
        }
        Ok(())
    }

    /// Clears `notify:<fqdn>:last` and `notify:<fqdn>:auto_suppressed_until`
    /// without touching `recent_ips` — used by the `ClearDampening` command.
    #[instrument(skip(self))]
    pub async fn clear_dampening(&self, fqdn: &Fqdn) -> Result<(), DomainError> {
        let p = fqdn.as_str();
        self.store.delete(&format!("notify:{p}:last")).await?;
        self.store.delete(&format!("notify:{p}:auto_suppressed_until")).await?;
        Ok(())
    }

    // ── dynamic domain list ──────────────────────────────────────────

    #[instrument(skip(self))]
    pub async fn dynamic_domains(&self) -> Result<Vec<Fqdn>, DomainError> {
        match self.store.get("dynamic:domains").await? {
            Some(raw) => {
                let names: Vec<String> = serde_json::from_str(&raw).unwrap_or_else(|e| {
                    warn!(error = %e, "corrupt dynamic:domains value, treating as empty");
                    Vec::new()
                });
                Ok(names.into_iter().filter_map(|n| Fqdn::parse(&n).ok()).collect())
            }
            None => Ok(Vec::new()),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_dynamic_domains(&self, domains: &[Fqdn]) -> Result<(), DomainError> {
        let names: Vec<&str> = domains.iter().map(|d| d.as_str()).collect();
        let raw = serde_json::to_string(&names)
            .map_err(|e| DomainError::Integrity { key: "dynamic:domains".into(), reason: e.to_string() })?;
        self.store.set("dynamic:domains", raw).await
    }

    // ── global change bucket ─────────────────────────────────────────

    /// Appends `entry` to the current 5-minute bucket. Must be called
    /// before the coordinated-change query within the same tick (spec
    /// §5), so the current change is included in its own correlation.
    #[instrument(skip(self, entry))]
    pub async fn append_global_change(
        &self,
        at: DateTime<Utc>,
        entry: GlobalChangeEntry,
    ) -> Result<(), DomainError> {
        let key = format!("global:dns_changes:{}", bucket_key(at));
        let mut entries = self.read_global_bucket(&key).await?;
        entries.push(entry);
        let raw = serde_json::to_string(&entries)
            .map_err(|e| DomainError::Integrity { key: key.clone(), reason: e.to_string() })?;
        self.store.set_with_ttl(&key, raw, BUCKET_TTL_SECS).await
    }

    /// All entries in the current bucket plus the one before it — the
    /// 10-minute correlation window of spec §4.7.
    #[instrument(skip(self))]
    pub async fn recent_global_changes(
        &self,
        at: DateTime<Utc>,
    ) -> Result<Vec<GlobalChangeEntry>, DomainError> {
        let current = bucket_key(at);
        let mut out = self
            .read_global_bucket(&format!("global:dns_changes:{current}"))
            .await?;
        out.extend(
            self.read_global_bucket(&format!("global:dns_changes:{}", current - 1))
                .await?,
        );
        Ok(out)
    }

    async fn read_global_bucket(&self, key: &str) -> Result<Vec<GlobalChangeEntry>, DomainError> {
        match self.store.get(key).await? {
            Some(raw) => Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(key, error = %e, "corrupt global change bucket, treating as empty");
                Vec::new()
            })),
            None => Ok(Vec::new()),
        }
    }

    // ── deployment version / bot status ──────────────────────────────

    #[instrument(skip(self))]
    pub async fn version_id(&self) -> Result<Option<String>, DomainError> {
        self.store.get("system:version_id").await
    }

    #[instrument(skip(self))]
    pub async fn set_version_id(&self, version: &str) -> Result<(), DomainError> {
        self.store.set("system:version_id", version.to_string()).await
    }

    #[instrument(skip(self, status))]
    pub async fn set_bot_status(&self, status: &dns_sentinel_domain::BotStatus) -> Result<(), DomainError> {
        let raw = serde_json::to_string(status)
            .map_err(|e| DomainError::Integrity { key: "bot:status".into(), reason: e.to_string() })?;
        self.store.set("bot:status", raw).await
    }
}

fn ms_to_datetime(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

fn parse_recent_ips(raw: &str, domain: &str) -> Vec<IpHistoryEntry> {
    #[derive(serde::Deserialize)]
    struct Raw {
        ips: Vec<String>,
        timestamp: i64,
    }
    match serde_json::from_str::<Vec<Raw>>(raw) {
        Ok(entries) => entries
            .into_iter()
            .filter_map(|e| ms_to_datetime(e.timestamp).map(|at| IpHistoryEntry {
                ips: SortedIpSet::new(e.ips),
                at,
            }))
            .collect(),
        Err(e) => {
            warn!(domain, error = %e, "corrupt notify:recent_ips value, treating as absent");
            Vec::new()
        }
    }
}

fn serialize_recent_ips(history: &[IpHistoryEntry]) -> String {
    #[derive(serde::Serialize)]
    struct Raw<'a> {
        ips: &'a [String],
        timestamp: i64,
    }
    let raw: Vec<Raw> = history
        .iter()
        .map(|e| Raw {
            ips: e.ips.as_slice(),
            timestamp: e.at.timestamp_millis(),
        })
        .collect();
    serde_json::to_string(&raw).unwrap_or_else(|_| "[]".to_string())
}
