use crate::change::Severity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityColor {
    Red,
    Orange,
    Yellow,
    Blue,
    Gray,
}

impl From<Severity> for SeverityColor {
    fn from(s: Severity) -> Self {
        match s {
            Severity::Critical => SeverityColor::Red,
            Severity::High => SeverityColor::Orange,
            Severity::Medium => SeverityColor::Yellow,
            Severity::Low => SeverityColor::Blue,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationField {
    pub name: String,
    pub value: String,
}

impl NotificationField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Distinguishes the notification path so the observer can route
/// differently-shaped events without the notifier caring about wire
/// format (which is out of scope here, per spec §1/§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Change,
    AutoSuppression,
    ErrorMonitoring,
    DnsAuthorityUnreachable,
    DnsZoneUpdated,
    NewDeployment,
}

/// Pure output of `NotificationBuilder` — no I/O, no knowledge of how it
/// will be transported (spec §4.9).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub kind_label: String,
    pub title: String,
    pub severity_color: SeverityColor,
    pub fields: Vec<NotificationField>,
    pub actions: Vec<String>,
}
