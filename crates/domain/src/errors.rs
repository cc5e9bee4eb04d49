use thiserror::Error;

/// Error kinds surfaced by the domain and its ports.
///
/// `Protocol` and `AuthorityUnreachable` are in-band signals the caller
/// interprets, not transport failures — they exist here only so adapters
/// have a single error type to return through `Result`.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("DoH responded with non-zero status {0}")]
    Protocol(u16),

    #[error("malformed stored value at key {key}: {reason}")]
    Integrity { key: String, reason: String },

    #[error("invalid domain name: {0}")]
    Validation(String),

    #[error("no reachable authority for domain")]
    AuthorityUnreachable,

    #[error("store error: {0}")]
    Store(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("configuration error: {0}")]
    Config(String),
}
