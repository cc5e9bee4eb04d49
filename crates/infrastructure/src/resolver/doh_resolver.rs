//! DNS-over-HTTPS resolver using the JSON contract (spec §4.1/§6).
//!
//! Performs two independent GET requests per domain — one for the A
//! records, one for the SOA — combining the answers into a single
//! `ResolveResult`. Unlike wire-format DoH, the JSON contract is a plain
//! `GET` with `Accept: application/dns-json`.

use async_trait::async_trait;
use dns_sentinel_application::ports::{ARecord, ResolveResult, Resolver, SoaRecord};
use dns_sentinel_domain::{DomainError, Fqdn};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const DNS_JSON_ACCEPT: &str = "application/dns-json";
const RECORD_TYPE_A: u16 = 1;
const RECORD_TYPE_SOA: u16 = 6;

#[derive(Debug, Deserialize)]
struct DohAnswer {
    #[serde(rename = "type")]
    record_type: u16,
    data: String,
    #[serde(rename = "TTL")]
    ttl: u32,
}

#[derive(Debug, Deserialize)]
struct DohResponse {
    #[serde(rename = "Status")]
    status: i32,
    #[serde(rename = "Answer", default)]
    answer: Vec<DohAnswer>,
    #[serde(rename = "Comment", default)]
    comment: Vec<String>,
}

pub struct DohResolver {
    client: reqwest::Client,
    doh_url: String,
    timeout: Duration,
}

impl DohResolver {
    pub fn new(doh_url: String, timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_millis(timeout_ms))
            .pool_max_idle_per_host(4)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client, doh_url, timeout: Duration::from_millis(timeout_ms) }
    }

    async fn query(&self, fqdn: &Fqdn, record_type: &str) -> Result<DohResponse, DomainError> {
        debug!(domain = fqdn.as_str(), record_type, "sending DoH JSON query");

        let response = tokio::time::timeout(
            self.timeout,
            self.client
                .get(&self.doh_url)
                .header("Accept", DNS_JSON_ACCEPT)
                .query(&[("name", fqdn.as_str()), ("type", record_type)])
                .send(),
        )
        .await
        .map_err(|_| DomainError::Transport(format!("timeout querying {} for {}", self.doh_url, fqdn)))?
        .map_err(|e| DomainError::Transport(format!("DoH request to {} failed: {e}", self.doh_url)))?;

        if !response.status().is_success() {
            return Err(DomainError::Transport(format!(
                "DoH server {} returned HTTP {}",
                self.doh_url,
                response.status()
            )));
        }

        tokio::time::timeout(self.timeout, response.json::<DohResponse>())
            .await
            .map_err(|_| DomainError::Transport(format!("timeout reading DoH response from {}", self.doh_url)))?
            .map_err(|e| DomainError::Transport(format!("malformed DoH JSON response: {e}")))
    }
}

/// Parses the whitespace-separated SOA `data` field: `primaryNS admin
/// serial refresh retry expire minTTL` (spec §6).
fn parse_soa(data: &str) -> Option<SoaRecord> {
    let mut parts = data.split_whitespace();
    Some(SoaRecord {
        primary_ns: parts.next()?.to_string(),
        admin_email: parts.next()?.to_string(),
        serial: parts.next()?.to_string(),
        refresh: parts.next()?.parse().ok()?,
        retry: parts.next()?.parse().ok()?,
        expire: parts.next()?.parse().ok()?,
        min_ttl: parts.next()?.parse().ok()?,
    })
}

#[async_trait]
impl Resolver for DohResolver {
    #[instrument(skip(self))]
    async fn resolve(&self, fqdn: &Fqdn) -> Result<ResolveResult, DomainError> {
        let soa_response = self.query(fqdn, "SOA").await?;
        let a_response = self.query(fqdn, "A").await?;

        let no_authority = soa_response
            .comment
            .iter()
            .chain(a_response.comment.iter())
            .any(|c| c.contains("No Reachable Authority"));

        let soa = soa_response
            .answer
            .iter()
            .find(|a| a.record_type == RECORD_TYPE_SOA)
            .and_then(|a| parse_soa(&a.data))
            .or_else(|| {
                if soa_response.answer.iter().any(|a| a.record_type == RECORD_TYPE_SOA) {
                    warn!(domain = fqdn.as_str(), "SOA answer present but unparseable");
                }
                None
            });

        let a_records: Vec<ARecord> = a_response
            .answer
            .iter()
            .filter(|a| a.record_type == RECORD_TYPE_A)
            .map(|a| ARecord { ip: a.data.clone(), ttl: a.ttl })
            .collect();

        let mut comments = soa_response.comment;
        comments.extend(a_response.comment);

        Ok(ResolveResult {
            a_records,
            soa,
            status: a_response.status,
            no_authority,
            comments,
        })
    }
}
