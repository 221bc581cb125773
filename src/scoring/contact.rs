use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::recency::{days_since, ACTIVE_DAYS, LAPSED_DAYS, RECENT_DAYS};
use crate::{ActivityEvent, Contact};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactScoringConfig {
    pub base: f64,
    pub recent_bonus: f64,
    pub fresh_bonus: f64,
    pub stale_penalty: f64,
    pub deliverable_bonus: f64,
    pub multi_list_bonus: f64,
    pub dual_list_bonus: f64,
    pub rich_profile_bonus: f64,
    pub partial_profile_bonus: f64,
}

impl Default for ContactScoringConfig {
    fn default() -> Self {
        Self {
            base: 50.0,
            recent_bonus: 20.0,
            fresh_bonus: 10.0,
            stale_penalty: 10.0,
            deliverable_bonus: 20.0,
            multi_list_bonus: 10.0,
            dual_list_bonus: 5.0,
            rich_profile_bonus: 10.0,
            partial_profile_bonus: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementTier {
    Champion,
    Warm,
    Cold,
}

impl EngagementTier {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            EngagementTier::Champion
        } else if score >= 40 {
            EngagementTier::Warm
        } else {
            EngagementTier::Cold
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EngagementTier::Champion => "Champion",
            EngagementTier::Warm => "Warm",
            EngagementTier::Cold => "Cold",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactScore {
    pub contact_id: i64,
    pub email: String,
    pub score: u32,
    pub tier: EngagementTier,
}

#[derive(Debug, Clone)]
pub struct ContactScorer {
    config: ContactScoringConfig,
}

impl ContactScorer {
    pub fn new(config: ContactScoringConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, contact: &Contact, now: DateTime<Utc>) -> ContactScore {
        if contact.email_blacklisted {
            return ContactScore {
                contact_id: contact.id,
                email: contact.email.clone(),
                score: 0,
                tier: EngagementTier::Cold,
            };
        }

        let mut score = self.config.base;

        let days = days_since(contact.modified_at, now);
        if days <= RECENT_DAYS {
            score += self.config.recent_bonus;
        } else if days <= ACTIVE_DAYS {
            score += self.config.fresh_bonus;
        } else if days > LAPSED_DAYS {
            score -= self.config.stale_penalty;
        }

        score += self.config.deliverable_bonus;

        let memberships = contact.list_ids.len();
        if memberships >= 3 {
            score += self.config.multi_list_bonus;
        } else if memberships == 2 {
            score += self.config.dual_list_bonus;
        }

        let filled = contact.filled_attribute_count();
        if filled >= 3 {
            score += self.config.rich_profile_bonus;
        } else if filled >= 1 {
            score += self.config.partial_profile_bonus;
        }

        let clamped = score.clamp(0.0, 100.0).round() as u32;
        ContactScore {
            contact_id: contact.id,
            email: contact.email.clone(),
            score: clamped,
            tier: EngagementTier::from_score(clamped),
        }
    }

    pub fn score_all(&self, contacts: &[Contact], now: DateTime<Utc>) -> Vec<ContactScore> {
        contacts
            .iter()
            .map(|contact| self.score(contact, now))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityScoringConfig {
    pub window_days: i64,
    pub open_points: f64,
    pub click_points: f64,
}

impl Default for ActivityScoringConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            open_points: 5.0,
            click_points: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityTier {
    Champion,
    Loyal,
    Potential,
    AtRisk,
    Dormant,
}

impl ActivityTier {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            ActivityTier::Champion
        } else if score >= 50 {
            ActivityTier::Loyal
        } else if score >= 25 {
            ActivityTier::Potential
        } else if score >= 5 {
            ActivityTier::AtRisk
        } else {
            ActivityTier::Dormant
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityTier::Champion => "Champion",
            ActivityTier::Loyal => "Loyal",
            ActivityTier::Potential => "Potential",
            ActivityTier::AtRisk => "At-Risk",
            ActivityTier::Dormant => "Dormant",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityScore {
    pub contact_id: i64,
    pub email: String,
    pub opens: usize,
    pub clicks: usize,
    pub score: u32,
    pub tier: ActivityTier,
}

#[derive(Debug, Clone)]
pub struct ActivityScorer {
    config: ActivityScoringConfig,
}

impl ActivityScorer {
    pub fn new(config: ActivityScoringConfig) -> Self {
        Self { config }
    }

    pub fn score(
        &self,
        contact: &Contact,
        events: &[ActivityEvent],
        now: DateTime<Utc>,
    ) -> ActivityScore {
        if contact.email_blacklisted {
            return ActivityScore {
                contact_id: contact.id,
                email: contact.email.clone(),
                opens: 0,
                clicks: 0,
                score: 0,
                tier: ActivityTier::Dormant,
            };
        }

        let cutoff = now - chrono::Duration::days(self.config.window_days);
        let mut opens = 0usize;
        let mut clicks = 0usize;

        for event in events {
            if !event.email.eq_ignore_ascii_case(&contact.email) {
                continue;
            }
            if let Some(moment) = event.opened_at {
                if moment >= cutoff {
                    opens += 1;
                }
            }
            if let Some(moment) = event.clicked_at {
                if moment >= cutoff {
                    clicks += 1;
                }
            }
        }

        let raw = opens as f64 * self.config.open_points + clicks as f64 * self.config.click_points;
        let score = raw.clamp(0.0, 100.0).round() as u32;
        ActivityScore {
            contact_id: contact.id,
            email: contact.email.clone(),
            opens,
            clicks,
            score,
            tier: ActivityTier::from_score(score),
        }
    }

    pub fn score_all(
        &self,
        contacts: &[Contact],
        events: &[ActivityEvent],
        now: DateTime<Utc>,
    ) -> Vec<ActivityScore> {
        contacts
            .iter()
            .map(|contact| self.score(contact, events, now))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringStrategy {
    Profile,
    Activity,
}

impl ScoringStrategy {
    pub fn label(self) -> &'static str {
        match self {
            ScoringStrategy::Profile => "profile",
            ScoringStrategy::Activity => "activity",
        }
    }
}
