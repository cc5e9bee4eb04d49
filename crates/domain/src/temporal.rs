#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePattern {
    MaintenanceWindow,
    OffHours,
    Weekend,
    Normal,
}

/// Pure function of the current wall-clock instant (spec §4.5).
#[derive(Debug, Clone, Copy)]
pub struct TemporalContext {
    pub is_weekend: bool,
    pub is_maintenance_window: bool,
    pub is_business_hours: bool,
    pub time_pattern: TimePattern,
}
