use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LbPattern {
    RoundRobin,
    Weighted,
    Failover,
    Geographic,
    Unknown,
}

/// Output of `LoadBalancerAnalyzer`.
#[derive(Debug, Clone)]
pub struct LbResult {
    pub is_load_balancer: bool,
    pub pattern: LbPattern,
    pub confidence: f64,
    pub analysis_text: String,
}

impl LbResult {
    pub fn unknown() -> Self {
        Self {
            is_load_balancer: false,
            pattern: LbPattern::Unknown,
            confidence: 0.0,
            analysis_text: "insufficient history to classify load-balancer behavior".to_string(),
        }
    }
}
