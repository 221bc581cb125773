use serde::{Deserialize, Serialize};

use engage_intel::scoring::{ActivityScore, ContactScore, ListHealthReport};
use engage_intel::{ActivityEvent, Campaign, Contact, EngineConfig, List, ScoringStrategy};

#[derive(Debug, Deserialize)]
pub struct ContactReportRequest {
    pub contacts: Vec<Contact>,
    pub strategy: Option<String>,
    pub events: Option<Vec<ActivityEvent>>,
}

#[derive(Debug, Serialize)]
pub struct ContactReportResponse {
    pub strategy: String,
    pub total_contacts: usize,
    pub profile_scores: Option<Vec<ContactScore>>,
    pub activity_scores: Option<Vec<ActivityScore>>,
}

impl ContactReportResponse {
    pub fn from_profile(scores: Vec<ContactScore>) -> Self {
        Self {
            strategy: ScoringStrategy::Profile.label().to_string(),
            total_contacts: scores.len(),
            profile_scores: Some(scores),
            activity_scores: None,
        }
    }

    pub fn from_activity(scores: Vec<ActivityScore>) -> Self {
        Self {
            strategy: ScoringStrategy::Activity.label().to_string(),
            total_contacts: scores.len(),
            profile_scores: None,
            activity_scores: Some(scores),
        }
    }
}

pub fn resolve_strategy(requested: Option<&str>, config: &EngineConfig) -> ScoringStrategy {
    match requested {
        Some(value) if value.eq_ignore_ascii_case("activity") => ScoringStrategy::Activity,
        Some(_) => ScoringStrategy::Profile,
        None => config.scoring.to_strategy(),
    }
}

#[derive(Debug, Deserialize)]
pub struct ListReportRequest {
    pub lists: Vec<List>,
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Serialize)]
pub struct ListReportResponse {
    pub total_lists: usize,
    pub reports: Vec<ListHealthReport>,
}

#[derive(Debug, Deserialize)]
pub struct CampaignReportRequest {
    pub campaigns: Vec<Campaign>,
}

#[derive(Debug, Deserialize)]
pub struct SendTimeReportRequest {
    pub events: Vec<ActivityEvent>,
    pub lookback_days: Option<i64>,
}
