use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchedulerConfig {
    /// Seconds between ticks. Spec §4.11 default: one minute.
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,

    /// Bounded per-tick fan-out, spec §5 suggests 8–32.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Host-provided version string; a change emits one `NewDeployment`
    /// notification before checks begin (spec §4.11).
    #[serde(default = "default_version_id")]
    pub deployment_version: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_secs: default_tick_secs(),
            concurrency: default_concurrency(),
            deployment_version: default_version_id(),
        }
    }
}

fn default_tick_secs() -> u64 {
    60
}

fn default_concurrency() -> usize {
    16
}

fn default_version_id() -> String {
    "dev".to_string()
}
