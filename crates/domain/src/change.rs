use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Addition,
    Removal,
    Replacement,
    CompleteChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Output of `ChangeClassifier` — the base classification before the
/// coordinated-change and dampening stages enrich it.
#[derive(Debug, Clone)]
pub struct ChangeContext {
    pub change_type: ChangeType,
    pub severity: Severity,
    pub ttl_secs: u32,
    pub confidence: f64,
    pub at: DateTime<Utc>,
}
