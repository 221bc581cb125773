use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::ActivityEvent;

pub const DAYS_PER_WEEK: usize = 7;
pub const HOURS_PER_DAY: usize = 24;

const DAY_NAMES: [&str; DAYS_PER_WEEK] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapConfig {
    pub default_lookback_days: i64,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            default_lookback_days: 90,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct HeatmapCell {
    pub opens: u64,
    pub clicks: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BestSendTime {
    pub day: u32,
    pub day_name: String,
    pub hour: u32,
    pub hour_formatted: String,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatmapReport {
    pub grid: Vec<Vec<HeatmapCell>>,
    pub max_value: u64,
    pub best_time: BestSendTime,
    pub total_engagements: u64,
    pub days_analyzed: i64,
}

impl HeatmapReport {
    pub fn cell(&self, day: u32, hour: u32) -> HeatmapCell {
        self.grid[day.saturating_sub(1) as usize][hour as usize]
    }
}

#[derive(Debug, Clone)]
pub struct HeatmapAnalyzer {
    config: HeatmapConfig,
}

impl HeatmapAnalyzer {
    pub fn new(config: HeatmapConfig) -> Self {
        Self { config }
    }

    pub fn analyze_default(&self, events: &[ActivityEvent], now: DateTime<Utc>) -> HeatmapReport {
        self.analyze(events, self.config.default_lookback_days, now)
    }

    pub fn analyze(
        &self,
        events: &[ActivityEvent],
        lookback_days: i64,
        now: DateTime<Utc>,
    ) -> HeatmapReport {
        let cutoff = now - Duration::days(lookback_days);
        let mut grid = vec![vec![HeatmapCell::default(); HOURS_PER_DAY]; DAYS_PER_WEEK];

        for event in events {
            if let Some(moment) = event.opened_at {
                if moment >= cutoff {
                    let (day, hour) = bin(moment);
                    grid[day][hour].opens += 1;
                    grid[day][hour].total += 1;
                }
            }
            if let Some(moment) = event.clicked_at {
                if moment >= cutoff {
                    let (day, hour) = bin(moment);
                    grid[day][hour].clicks += 1;
                    grid[day][hour].total += 1;
                }
            }
        }

        let mut max_value = 0u64;
        let mut total_engagements = 0u64;
        let mut best_day = 0usize;
        let mut best_hour = 0usize;
        let mut best_total = grid[0][0].total;

        for day in 0..DAYS_PER_WEEK {
            for hour in 0..HOURS_PER_DAY {
                let total = grid[day][hour].total;
                total_engagements += total;
                if total > max_value {
                    max_value = total;
                }
                if total > best_total {
                    best_day = day;
                    best_hour = hour;
                    best_total = total;
                }
            }
        }

        let best_time = BestSendTime {
            day: best_day as u32 + 1,
            day_name: DAY_NAMES[best_day].to_string(),
            hour: best_hour as u32,
            hour_formatted: format_hour(best_hour as u32),
            total: best_total,
        };

        HeatmapReport {
            grid,
            max_value,
            best_time,
            total_engagements,
            days_analyzed: lookback_days,
        }
    }
}

fn bin(moment: DateTime<Utc>) -> (usize, usize) {
    let day = moment.weekday().num_days_from_sunday() as usize;
    let hour = moment.hour() as usize;
    (day, hour)
}

pub fn format_hour(hour: u32) -> String {
    match hour {
        0 => "12:00 AM".to_string(),
        1..=11 => format!("{}:00 AM", hour),
        12 => "12:00 PM".to_string(),
        _ => format!("{}:00 PM", hour - 12),
    }
}
