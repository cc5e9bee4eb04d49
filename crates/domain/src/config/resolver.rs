use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// DoH endpoint queried for both SOA and A lookups (spec §4.1/§6).
    #[serde(default = "default_doh_url")]
    pub doh_url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            doh_url: default_doh_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_doh_url() -> String {
    "https://1.1.1.1/dns-query".to_string()
}

fn default_timeout_ms() -> u64 {
    5_000
}
