pub mod benchmark;
pub mod contact;
pub mod heatmap;
pub mod list_health;

pub use benchmark::{
    BenchmarkConfig, BenchmarkReport, CampaignBenchmark, IndustryBenchmarks, PerformanceDelta,
    RankedCampaign, RateAverages,
};
pub use contact::{
    ActivityScore, ActivityScorer, ActivityScoringConfig, ActivityTier, ContactScore,
    ContactScorer, ContactScoringConfig, EngagementTier, ScoringStrategy,
};
pub use heatmap::{
    BestSendTime, HeatmapAnalyzer, HeatmapCell, HeatmapConfig, HeatmapReport,
};
pub use list_health::{HealthGrade, ListHealthConfig, ListHealthReport, ListHealthScorer};
