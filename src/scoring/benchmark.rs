use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::{Campaign, CampaignStats};

pub const INDUSTRY_OPEN_RATE: f64 = 21.5;
pub const INDUSTRY_CLICK_RATE: f64 = 2.3;
pub const INDUSTRY_BOUNCE_RATE: f64 = 0.7;
pub const INDUSTRY_UNSUBSCRIBE_RATE: f64 = 0.25;

const PERFORMER_SLOTS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    pub open_weight: f64,
    pub click_weight: f64,
    pub bounce_weight: f64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            open_weight: 0.4,
            click_weight: 0.5,
            bounce_weight: 0.1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RateAverages {
    pub open_rate: f64,
    pub click_rate: f64,
    pub bounce_rate: f64,
    pub unsubscribe_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndustryBenchmarks {
    pub open_rate: f64,
    pub click_rate: f64,
    pub bounce_rate: f64,
    pub unsubscribe_rate: f64,
}

impl Default for IndustryBenchmarks {
    fn default() -> Self {
        Self {
            open_rate: INDUSTRY_OPEN_RATE,
            click_rate: INDUSTRY_CLICK_RATE,
            bounce_rate: INDUSTRY_BOUNCE_RATE,
            unsubscribe_rate: INDUSTRY_UNSUBSCRIBE_RATE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedCampaign {
    pub rank: usize,
    pub campaign_id: i64,
    pub name: String,
    pub subject: String,
    pub sent_date: Option<DateTime<Utc>>,
    pub engagement_score: f64,
    pub open_rate: f64,
    pub click_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceDelta {
    pub vs_industry_open: f64,
    pub vs_industry_click: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub total_campaigns: usize,
    pub averages: RateAverages,
    pub industry: IndustryBenchmarks,
    pub top_performers: Vec<RankedCampaign>,
    pub bottom_performers: Vec<RankedCampaign>,
    pub delta: PerformanceDelta,
}

#[derive(Debug, Clone)]
pub struct CampaignBenchmark {
    config: BenchmarkConfig,
}

impl CampaignBenchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    pub fn engagement_score(&self, stats: &CampaignStats) -> f64 {
        let raw = stats.open_rate * self.config.open_weight
            + stats.click_rate * self.config.click_weight
            - stats.bounce_rate * self.config.bounce_weight;
        round2(raw.max(0.0))
    }

    pub fn report(&self, campaigns: &[Campaign]) -> BenchmarkReport {
        let eligible: Vec<&Campaign> = campaigns
            .iter()
            .filter(|campaign| campaign.status == "sent" && campaign.stats.sent > 0)
            .collect();

        let mut sent = 0u64;
        let mut delivered = 0u64;
        let mut opens = 0u64;
        let mut clicks = 0u64;
        let mut bounces = 0u64;
        let mut unsubscribes = 0u64;

        for campaign in &eligible {
            sent += campaign.stats.sent;
            delivered += campaign.stats.delivered;
            opens += campaign.stats.unique_opens;
            clicks += campaign.stats.unique_clicks;
            bounces += campaign.stats.hard_bounces + campaign.stats.soft_bounces;
            unsubscribes += campaign.stats.unsubscribes;
        }

        let averages = RateAverages {
            open_rate: percentage(opens, delivered),
            click_rate: percentage(clicks, delivered),
            bounce_rate: percentage(bounces, sent),
            unsubscribe_rate: percentage(unsubscribes, delivered),
        };

        let mut ranked: Vec<RankedCampaign> = eligible
            .iter()
            .map(|campaign| RankedCampaign {
                rank: 0,
                campaign_id: campaign.id,
                name: campaign.name.clone(),
                subject: campaign.subject.clone(),
                sent_date: campaign.sent_date,
                engagement_score: self.engagement_score(&campaign.stats),
                open_rate: campaign.stats.open_rate,
                click_rate: campaign.stats.click_rate,
            })
            .collect();

        ranked.sort_by(|a, b| {
            match b
                .engagement_score
                .partial_cmp(&a.engagement_score)
                .unwrap_or(Ordering::Equal)
            {
                Ordering::Equal => a.campaign_id.cmp(&b.campaign_id),
                order => order,
            }
        });

        for (index, campaign) in ranked.iter_mut().enumerate() {
            campaign.rank = index + 1;
        }

        let top_performers: Vec<RankedCampaign> =
            ranked.iter().take(PERFORMER_SLOTS).cloned().collect();
        let bottom_start = ranked.len().saturating_sub(PERFORMER_SLOTS);
        let bottom_performers: Vec<RankedCampaign> = ranked[bottom_start..].to_vec();

        let delta = PerformanceDelta {
            vs_industry_open: averages.open_rate - INDUSTRY_OPEN_RATE,
            vs_industry_click: averages.click_rate - INDUSTRY_CLICK_RATE,
        };

        BenchmarkReport {
            total_campaigns: ranked.len(),
            averages,
            industry: IndustryBenchmarks::default(),
            top_performers,
            bottom_performers,
            delta,
        }
    }
}

fn percentage(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        100.0 * numerator as f64 / denominator as f64
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
