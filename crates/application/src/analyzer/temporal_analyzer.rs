use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use dns_sentinel_domain::{TemporalContext, TimePattern};

/// Pure function of the current wall-clock instant (spec §4.5).
pub fn temporal_context(now: DateTime<Utc>) -> TemporalContext {
    let hour = now.hour();
    let is_weekend = matches!(now.weekday(), Weekday::Sat | Weekday::Sun);
    let is_maintenance_window = (2..=6).contains(&hour) || matches!(hour, 22 | 23 | 0 | 1 | 2);
    let business_hour = (8..=18).contains(&hour);
    let is_business_hours = !is_weekend && business_hour;

    // Off-hours is judged against the hour alone, not `is_business_hours`,
    // so a weekend daytime hour still reaches the weekend branch below
    // instead of being swallowed by off-hours first.
    let time_pattern = if is_maintenance_window {
        TimePattern::MaintenanceWindow
    } else if !business_hour {
        TimePattern::OffHours
    } else if is_weekend {
        TimePattern::Weekend
    } else {
        TimePattern::Normal
    };

    TemporalContext {
        is_weekend,
        is_maintenance_window,
        is_business_hours,
        time_pattern,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn weekday_business_hours() {
        // Tuesday 2026-07-28 10:00 UTC
        let now = Utc.with_ymd_and_hms(2026, 7, 28, 10, 0, 0).unwrap();
        let ctx = temporal_context(now);
        assert!(ctx.is_business_hours);
        assert!(!ctx.is_weekend);
        assert_eq!(ctx.time_pattern, TimePattern::Normal);
    }

    #[test]
    fn weekday_maintenance_window() {
        let now = Utc.with_ymd_and_hms(2026, 7, 28, 3, 0, 0).unwrap();
        let ctx = temporal_context(now);
        assert!(ctx.is_maintenance_window);
        assert_eq!(ctx.time_pattern, TimePattern::MaintenanceWindow);
    }

    #[test]
    fn weekend_outside_maintenance() {
        // Saturday 2026-08-01 12:00 UTC
        let now = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
        let ctx = temporal_context(now);
        assert!(ctx.is_weekend);
        assert!(!ctx.is_business_hours);
        assert_eq!(ctx.time_pattern, TimePattern::Weekend);
    }

    #[test]
    fn weekday_off_hours_evening() {
        let now = Utc.with_ymd_and_hms(2026, 7, 28, 20, 0, 0).unwrap();
        let ctx = temporal_context(now);
        assert!(!ctx.is_maintenance_window);
        assert!(!ctx.is_business_hours);
        assert_eq!(ctx.time_pattern, TimePattern::OffHours);
    }
}
