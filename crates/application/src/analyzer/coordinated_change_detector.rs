use dns_sentinel_domain::{CoordinationResult, Fqdn, GlobalChangeEntry, SortedIpSet};

/// Scores cross-domain correlation from a window of global-bucket entries
/// (spec §4.7). The caller is responsible for gathering `related_entries`
/// from the store across the 10-minute window and appending the current
/// change before calling this.
pub fn detect_coordination(
    target: &Fqdn,
    target_ips: &SortedIpSet,
    related_entries: &[GlobalChangeEntry],
) -> CoordinationResult {
    let parent = target.parent();

    let mut related_domains: Vec<Fqdn> = Vec::new();
    let mut related_ips_union = SortedIpSet::empty();

    for entry in related_entries {
        if entry.domain == target.as_str() {
            continue;
        }
        let Ok(entry_fqdn) = Fqdn::parse(&entry.domain) else {
            continue;
        };
        if entry_fqdn.parent() != parent {
            continue;
        }
        if !related_domains.iter().any(|d| d.as_str() == entry_fqdn.as_str()) {
            related_domains.push(entry_fqdn);
        }
        related_ips_union = SortedIpSet::new(
            related_ips_union
                .iter()
                .cloned()
                .chain(entry.ips.iter().cloned())
                .collect(),
        );
    }

    if related_domains.is_empty() {
        return CoordinationResult::none();
    }

    let intersection = target_ips.intersection_count(&related_ips_union);
    let union_size = related_ips_union.len().max(target_ips.len());
    let overlap_ratio = if union_size == 0 {
        0.0
    } else {
        intersection as f64 / union_size as f64
    };

    let score = (0.3 * related_domains.len() as f64 + 0.7 * overlap_ratio).min(1.0);
    let is_coordinated = related_domains.len() >= 2 && score > 0.6;

    let analysis_text = format!(
        "{} sibling domain(s) under {} changed with {:.0}% IP overlap in the correlation window",
        related_domains.len(),
        parent,
        overlap_ratio * 100.0
    );

    CoordinationResult {
        is_coordinated,
        score,
        analysis_text,
        related_domains,
    }
}
