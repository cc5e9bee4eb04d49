/// Output of `DampeningCalculator`: the notification decision for one
/// observed change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyDecision {
    /// Emit a normal change notification and advance `lastNotificationAt`.
    Emit,
    /// Within the dampening window — stay silent, but `recentIPHistory`
    /// is still updated by the caller.
    Suppress,
    /// The auto-suppression threshold was crossed on this tick: emit the
    /// distinct auto-suppression notice, then go silent for 4 hours.
    AutoSuppressionNotice,
    /// Already inside the 4-hour auto-suppression window opened by a
    /// previous `AutoSuppressionNotice`.
    AutoSuppressed,
}

#[derive(Debug, Clone)]
pub struct DampeningResult {
    pub period_ms: i64,
    pub decision: NotifyDecision,
    /// True when the oscillation override replaced the calculator's
    /// period rather than the normal base×multiplier path.
    pub oscillation_override: bool,
}

pub const MIN_DAMPENING_MS: i64 = 60_000;
pub const MAX_DAMPENING_MS: i64 = 4 * 60 * 60 * 1000;

pub fn clamp_period(ms: f64) -> i64 {
    (ms.round() as i64).clamp(MIN_DAMPENING_MS, MAX_DAMPENING_MS)
}
