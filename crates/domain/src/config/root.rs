use serde::{Deserialize, Serialize};

use super::database::DatabaseConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::notifier::NotifierConfig;
use super::resolver::ResolverConfig;
use super::scheduler::SchedulerConfig;

/// CLI flags that override file-loaded config, mirroring the
/// file+CLI-merge pattern of the teacher's `Config::load`.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub tick_secs: Option<u64>,
    pub webhook_url: Option<String>,
    pub log_level: Option<String>,
    pub database_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    pub resolver: ResolverConfig,
    pub scheduler: SchedulerConfig,
    pub notifier: NotifierConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,

    /// Boot-time list of statically monitored domains (spec §3: immutable
    /// via the API, only dynamic domains can be added/removed at runtime).
    #[serde(default)]
    pub static_domains: Vec<String>,
}

impl Config {
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("dns-sentinel.toml").exists() {
            Self::from_file("dns-sentinel.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(secs) = overrides.tick_secs {
            self.scheduler.tick_secs = secs;
        }
        if let Some(url) = overrides.webhook_url {
            self.notifier.webhook_url = Some(url);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(path) = overrides.database_path {
            self.database.path = path;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scheduler.tick_secs == 0 {
            return Err(ConfigError::Validation(
                "scheduler.tick_secs cannot be 0".to_string(),
            ));
        }
        if self.scheduler.concurrency == 0 {
            return Err(ConfigError::Validation(
                "scheduler.concurrency cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}
