use dns_sentinel_domain::{CdnInfo, SortedIpSet};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::LazyLock;

/// `(provider, range_start, range_end)` inclusive, as 32-bit unsigned
/// integers. Bit-exact per spec §6 — compatibility tests assert these
/// literals resolve to the stated providers.
static CDN_RANGES: LazyLock<Vec<(&'static str, u32, u32)>> = LazyLock::new(|| {
    vec![
        // Cloudflare
        range("Cloudflare", "104.16.0.0", "104.31.255.255"),
        range("Cloudflare", "172.64.0.0", "172.71.255.255"),
        range("Cloudflare", "108.162.192.0", "108.162.255.255"),
        range("Cloudflare", "190.93.240.0", "190.93.255.255"),
        range("Cloudflare", "188.114.96.0", "188.114.127.255"),
        // AWS (CloudFront/ELB)
        range("AWS", "13.32.0.0", "13.35.255.255"),
        range("AWS", "13.224.0.0", "13.227.255.255"),
        range("AWS", "13.249.0.0", "13.249.255.255"),
        range("AWS", "52.84.0.0", "52.85.255.255"),
        range("AWS", "54.230.0.0", "54.239.255.255"),
        range("AWS", "204.246.164.0", "204.246.191.255"),
        range("AWS", "205.251.192.0", "205.251.255.255"),
        // Fastly
        range("Fastly", "23.235.32.0", "23.235.63.255"),
        range("Fastly", "151.101.0.0", "151.101.255.255"),
        range("Fastly", "199.232.0.0", "199.232.255.255"),
        // Google
        range("Google", "35.186.0.0", "35.191.255.255"),
        range("Google", "130.211.0.0", "130.211.255.255"),
        range("Google", "35.244.0.0", "35.247.255.255"),
        // Azure
        range("Azure", "40.90.0.0", "40.91.255.255"),
        range("Azure", "13.107.42.0", "13.107.43.255"),
        range("Azure", "204.79.197.0", "204.79.197.255"),
        // KeyCDN
        range("KeyCDN", "119.81.0.0", "119.81.255.255"),
        // StackPath
        range("StackPath", "94.31.0.0", "94.31.255.255"),
        // Imperva
        range("Imperva", "149.126.72.0", "149.126.79.255"),
        range("Imperva", "185.11.124.0", "185.11.127.255"),
    ]
});

fn range(provider: &'static str, start: &str, end: &str) -> (&'static str, u32, u32) {
    (
        provider,
        u32::from(Ipv4Addr::from_str(start).expect("valid literal")),
        u32::from(Ipv4Addr::from_str(end).expect("valid literal")),
    )
}

fn find_provider(addr: u32) -> Option<&'static str> {
    CDN_RANGES
        .iter()
        .find(|(_, start, end)| addr >= *start && addr <= *end)
        .map(|(provider, _, _)| *provider)
}

/// Classifies an IP set against the curated CDN range table (spec §4.3).
pub fn detect_cdn(ips: &SortedIpSet) -> CdnInfo {
    if ips.is_empty() {
        return CdnInfo::none();
    }

    let mut first_provider: Option<&'static str> = None;
    let mut matches = 0usize;

    for ip in ips.iter() {
        if let Ok(addr) = Ipv4Addr::from_str(ip) {
            if let Some(provider) = find_provider(u32::from(addr)) {
                matches += 1;
                if first_provider.is_none() {
                    first_provider = Some(provider);
                }
            }
        }
    }

    let confidence = matches as f64 / ips.len() as f64;
    CdnInfo {
        provider: if confidence > 0.5 { first_provider } else { None },
        confidence,
        is_any_cdn: confidence > 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_cloudflare() {
        let ips = SortedIpSet::new(vec!["104.16.1.1".into(), "104.16.1.2".into()]);
        let info = detect_cdn(&ips);
        assert_eq!(info.provider, Some("Cloudflare"));
        assert_eq!(info.confidence, 1.0);
        assert!(info.is_any_cdn);
    }

    #[test]
    fn detects_aws() {
        let ips = SortedIpSet::new(vec!["13.32.1.1".into()]);
        assert_eq!(detect_cdn(&ips).provider, Some("AWS"));
    }

    #[test]
    fn no_match_returns_none_provider() {
        let ips = SortedIpSet::new(vec!["8.8.4.4".into()]);
        let info = detect_cdn(&ips);
        assert_eq!(info.provider, None);
        assert!(!info.is_any_cdn);
        assert_eq!(info.confidence, 0.0);
    }

    #[test]
    fn confidence_threshold_requires_majority() {
        let ips = SortedIpSet::new(vec!["104.16.1.1".into(), "8.8.4.4".into()]);
        let info = detect_cdn(&ips);
        // exactly 0.5 confidence — spec requires > 0.5 for a named provider
        assert_eq!(info.confidence, 0.5);
        assert_eq!(info.provider, None);
        assert!(info.is_any_cdn);
    }

    #[test]
    fn monotonicity_under_superset() {
        let base = SortedIpSet::new(vec!["104.16.1.1".into()]);
        let superset = SortedIpSet::new(vec!["104.16.1.1".into(), "104.16.1.2".into()]);
        assert!(detect_cdn(&superset).confidence >= detect_cdn(&base).confidence);
    }
}
