#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("configuration validation error: {0}")]
    Validation(String),
}
