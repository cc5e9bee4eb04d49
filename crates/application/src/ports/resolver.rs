use async_trait::async_trait;
use dns_sentinel_domain::{DomainError, Fqdn};

#[derive(Debug, Clone)]
pub struct ARecord {
    pub ip: String,
    pub ttl: u32,
}

#[derive(Debug, Clone)]
pub struct SoaRecord {
    pub primary_ns: String,
    pub admin_email: String,
    pub serial: String,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub min_ttl: u32,
}

/// Combined answer of the two independent DoH queries (SOA then A) that
/// one `resolve()` call performs (spec §4.1).
#[derive(Debug, Clone)]
pub struct ResolveResult {
    pub a_records: Vec<ARecord>,
    pub soa: Option<SoaRecord>,
    pub status: i32,
    pub no_authority: bool,
    pub comments: Vec<String>,
}

impl ResolveResult {
    /// The minimum TTL across the current A-record set, used by the
    /// dampening calculator's base-period table. Falls back to 0 when
    /// there are no A records (e.g. a `removal` change).
    pub fn min_ttl(&self) -> u32 {
        self.a_records.iter().map(|r| r.ttl).min().unwrap_or(0)
    }
}

/// Queries a DoH endpoint for SOA and A records (spec §4.1). Any
/// transport failure surfaces as `Err`; a non-zero DoH `Status` is not an
/// error — the caller interprets it.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, fqdn: &Fqdn) -> Result<ResolveResult, DomainError>;
}
