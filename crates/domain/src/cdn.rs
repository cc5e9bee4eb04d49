/// Output of the CDN detector: at most one named provider, plus a
/// confidence in `[0, 1]` and a cheap "was any range matched at all" flag.
#[derive(Debug, Clone, PartialEq)]
pub struct CdnInfo {
    pub provider: Option<&'static str>,
    pub confidence: f64,
    pub is_any_cdn: bool,
}

impl CdnInfo {
    pub fn none() -> Self {
        Self {
            provider: None,
            confidence: 0.0,
            is_any_cdn: false,
        }
    }
}
