use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Where a monitored domain came from. Affects removal permission only —
/// static domains are refused by `RemoveDynamic`/`RemoveSubtree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainProvenance {
    Static,
    Dynamic,
}

/// A fully qualified domain name: lowercased, label-validated, ≤253 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fqdn(Arc<str>);

impl Fqdn {
    /// Validates and normalizes `raw` per the label regex in spec §6:
    /// `^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$`,
    /// total length ≤253, lowercased before storage.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty() || raw.len() > 253 {
            return Err(DomainError::Validation(format!(
                "domain length {} out of bounds (1..=253)",
                raw.len()
            )));
        }
        if !is_valid_fqdn(raw) {
            return Err(DomainError::Validation(format!(
                "domain '{}' does not match the label grammar",
                raw
            )));
        }
        Ok(Self(Arc::from(raw.to_ascii_lowercase().as_str())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last two dot-separated labels — the "registrable parent" used by
    /// the coordinated-change detector to group sibling domains.
    pub fn parent(&self) -> &str {
        let s = self.0.as_ref();
        match s.rfind('.') {
            None => s,
            Some(last_dot) => match s[..last_dot].rfind('.') {
                None => s,
                Some(second_last_dot) => &s[second_last_dot + 1..],
            },
        }
    }

    /// True iff `other` is `self` with one or more labels prepended
    /// (i.e. `other` is suffixed with `.self`). Used by `RemoveSubtree`.
    pub fn is_subdomain_of(&self, parent: &Fqdn) -> bool {
        self.0.ends_with(&format!(".{}", parent.0.as_ref()))
    }
}

impl fmt::Display for Fqdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_valid_fqdn(s: &str) -> bool {
    s.split('.').all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > 63 {
        return false;
    }
    let bytes = label.as_bytes();
    let alnum = |b: u8| b.is_ascii_alphanumeric();
    if !alnum(bytes[0]) || !alnum(bytes[bytes.len() - 1]) {
        return false;
    }
    bytes.iter().all(|&b| alnum(b) || b == b'-')
}
