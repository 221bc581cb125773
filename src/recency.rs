use chrono::{DateTime, Utc};

pub const STALE_SENTINEL_DAYS: i64 = 999;

pub const RECENT_DAYS: i64 = 30;
pub const ACTIVE_DAYS: i64 = 90;
pub const LAPSED_DAYS: i64 = 180;

pub fn days_since(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    match timestamp {
        Some(moment) => (now - moment).num_days(),
        None => STALE_SENTINEL_DAYS,
    }
}
