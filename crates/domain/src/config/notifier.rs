use serde::{Deserialize, Serialize};

/// Webhook transport is out of scope for this system (spec §1); the
/// config only decides which concrete `Notifier` adapter is wired in.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotifierConfig {
    #[serde(default)]
    pub webhook_url: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    5_000
}
