use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Published by the Scheduler once per tick at key `bot:status` (spec §6).
/// The component list in spec §2 never names an explicit owner for this
/// key; the Scheduler is the natural one since it already enumerates all
/// domains once per tick (see SPEC_FULL.md §3 supplement).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotStatus {
    pub online: bool,
    pub last_check: DateTime<Utc>,
    pub domains_monitored: usize,
    pub activity: String,
    pub updated_at: DateTime<Utc>,
}
