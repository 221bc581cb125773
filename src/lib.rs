pub mod config;
pub mod export;
pub mod recency;
pub mod scoring;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use crate::config::EngineConfig;
pub use crate::recency::{days_since, STALE_SENTINEL_DAYS};
pub use crate::scoring::{
    ActivityScore, ActivityScorer, BenchmarkReport, CampaignBenchmark, ContactScore,
    ContactScorer, EngagementTier, HeatmapAnalyzer, HeatmapReport, HealthGrade,
    ListHealthReport, ListHealthScorer, ScoringStrategy,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub list_ids: Vec<i64>,
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub email_blacklisted: bool,
    #[serde(default)]
    pub sms_blacklisted: bool,
    pub modified_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Contact {
    pub fn in_list(&self, list_id: i64) -> bool {
        self.list_ids.contains(&list_id)
    }

    pub fn filled_attribute_count(&self) -> usize {
        self.attributes
            .values()
            .filter(|value| attribute_filled(value))
            .count()
    }
}

fn attribute_filled(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::String(text) => !text.trim().is_empty(),
        _ => true,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct List {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub total_subscribers: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub sent_date: Option<DateTime<Utc>>,
    pub status: String,
    #[serde(default)]
    pub stats: CampaignStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignStats {
    #[serde(default)]
    pub sent: u64,
    #[serde(default)]
    pub delivered: u64,
    #[serde(default)]
    pub unique_opens: u64,
    #[serde(default)]
    pub unique_clicks: u64,
    #[serde(default)]
    pub hard_bounces: u64,
    #[serde(default)]
    pub soft_bounces: u64,
    #[serde(default)]
    pub unsubscribes: u64,
    #[serde(default)]
    pub open_rate: f64,
    #[serde(default)]
    pub click_rate: f64,
    #[serde(default)]
    pub bounce_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub email: String,
    pub campaign_id: i64,
    #[serde(default)]
    pub campaign_name: String,
    pub opened_at: Option<DateTime<Utc>>,
    pub clicked_at: Option<DateTime<Utc>>,
}

pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let length = digits.len();
    let mut result = String::with_capacity(length + length / 3);

    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (length - index) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }

    result
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
