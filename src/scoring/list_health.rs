use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::recency::{days_since, ACTIVE_DAYS, LAPSED_DAYS, RECENT_DAYS, STALE_SENTINEL_DAYS};
use crate::{Contact, List};

const LARGE_LIST: u64 = 1000;
const MEDIUM_LIST: u64 = 500;
const SMALL_LIST: u64 = 100;

const CLEAN_RATE: f64 = 0.01;
const FAIR_RATE: f64 = 0.05;
const DIRTY_RATE: f64 = 0.10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListHealthConfig {
    pub base: f64,
    pub large_list_bonus: f64,
    pub medium_list_bonus: f64,
    pub small_list_bonus: f64,
    pub clean_bonus: f64,
    pub fair_bonus: f64,
    pub dirty_penalty: f64,
    pub recent_bonus: f64,
    pub active_bonus: f64,
    pub stale_penalty: f64,
}

impl Default for ListHealthConfig {
    fn default() -> Self {
        Self {
            base: 50.0,
            large_list_bonus: 15.0,
            medium_list_bonus: 10.0,
            small_list_bonus: 5.0,
            clean_bonus: 20.0,
            fair_bonus: 10.0,
            dirty_penalty: 20.0,
            recent_bonus: 15.0,
            active_bonus: 10.0,
            stale_penalty: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthGrade {
    A,
    B,
    C,
    D,
    F,
}

impl HealthGrade {
    pub fn from_score(score: u32) -> Self {
        if score >= 90 {
            HealthGrade::A
        } else if score >= 80 {
            HealthGrade::B
        } else if score >= 70 {
            HealthGrade::C
        } else if score >= 60 {
            HealthGrade::D
        } else {
            HealthGrade::F
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthGrade::A => "A",
            HealthGrade::B => "B",
            HealthGrade::C => "C",
            HealthGrade::D => "D",
            HealthGrade::F => "F",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListHealthReport {
    pub list_id: i64,
    pub name: String,
    pub total_subscribers: u64,
    pub member_count: usize,
    pub active_count: usize,
    pub blacklist_rate: f64,
    pub avg_days_since_modified: f64,
    pub health_score: u32,
    pub grade: HealthGrade,
}

#[derive(Debug, Clone)]
pub struct ListHealthScorer {
    config: ListHealthConfig,
}

impl ListHealthScorer {
    pub fn new(config: ListHealthConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, list: &List, members: &[&Contact], now: DateTime<Utc>) -> ListHealthReport {
        let total = members.len();
        let blacklisted = members
            .iter()
            .filter(|contact| contact.email_blacklisted)
            .count();
        let active = total - blacklisted;

        let avg_days = if total > 0 {
            let sum: i64 = members
                .iter()
                .map(|contact| days_since(contact.modified_at, now))
                .sum();
            sum as f64 / total as f64
        } else {
            STALE_SENTINEL_DAYS as f64
        };

        let blacklist_rate = if total > 0 {
            blacklisted as f64 / total as f64
        } else {
            0.0
        };

        let mut score = self.config.base;

        if list.total_subscribers >= LARGE_LIST {
            score += self.config.large_list_bonus;
        } else if list.total_subscribers >= MEDIUM_LIST {
            score += self.config.medium_list_bonus;
        } else if list.total_subscribers >= SMALL_LIST {
            score += self.config.small_list_bonus;
        }

        if blacklist_rate <= CLEAN_RATE {
            score += self.config.clean_bonus;
        } else if blacklist_rate <= FAIR_RATE {
            score += self.config.fair_bonus;
        } else if blacklist_rate > DIRTY_RATE {
            score -= self.config.dirty_penalty;
        }

        if avg_days <= RECENT_DAYS as f64 {
            score += self.config.recent_bonus;
        } else if avg_days <= ACTIVE_DAYS as f64 {
            score += self.config.active_bonus;
        } else if avg_days > LAPSED_DAYS as f64 {
            score -= self.config.stale_penalty;
        }

        let clamped = score.clamp(0.0, 100.0).round() as u32;
        ListHealthReport {
            list_id: list.id,
            name: list.name.clone(),
            total_subscribers: list.total_subscribers,
            member_count: total,
            active_count: active,
            blacklist_rate,
            avg_days_since_modified: avg_days,
            health_score: clamped,
            grade: HealthGrade::from_score(clamped),
        }
    }

    pub fn score_all(
        &self,
        lists: &[List],
        contacts: &[Contact],
        now: DateTime<Utc>,
    ) -> Vec<ListHealthReport> {
        let mut reports: Vec<ListHealthReport> = lists
            .iter()
            .map(|list| {
                let members: Vec<&Contact> = contacts
                    .iter()
                    .filter(|contact| contact.in_list(list.id))
                    .collect();
                self.score(list, &members, now)
            })
            .collect();

        reports.sort_by(|a, b| match b.health_score.cmp(&a.health_score) {
            Ordering::Equal => a.list_id.cmp(&b.list_id),
            order => order,
        });

        reports
    }
}
