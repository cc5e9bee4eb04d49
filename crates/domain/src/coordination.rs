use crate::fqdn::Fqdn;

/// Output of `CoordinatedChangeDetector`.
#[derive(Debug, Clone)]
pub struct CoordinationResult {
    pub is_coordinated: bool,
    pub score: f64,
    pub analysis_text: String,
    pub related_domains: Vec<Fqdn>,
}

impl CoordinationResult {
    pub fn none() -> Self {
        Self {
            is_coordinated: false,
            score: 0.0,
            analysis_text: "no sibling domains changed in the correlation window".to_string(),
            related_domains: Vec::new(),
        }
    }
}
