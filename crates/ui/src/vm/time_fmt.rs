use chrono::{DateTime, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

/// `mm:ss`; anything at or below zero shows as `00:00`.
#[must_use]
pub fn format_countdown(secs: i64) -> String {
    if secs <= 0 {
        return "00:00".to_owned();
    }
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Share of the budget still left, rounded to a whole percent.
#[must_use]
pub fn countdown_percent(time_left: u32, budget: u32) -> u32 {
    if budget == 0 {
        return 0;
    }
    let pct = (u64::from(time_left) * 100 + u64::from(budget) / 2) / u64::from(budget);
    u32::try_from(pct).unwrap_or(u32::MAX)
}
