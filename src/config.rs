use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::scoring::{
    ActivityScoringConfig, BenchmarkConfig, ContactScoringConfig, HeatmapConfig, ListHealthConfig,
    ScoringStrategy,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringStrategyConfig {
    pub strategy: String,
}

impl Default for ScoringStrategyConfig {
    fn default() -> Self {
        Self {
            strategy: "profile".to_string(),
        }
    }
}

impl ScoringStrategyConfig {
    pub fn to_strategy(&self) -> ScoringStrategy {
        match self.strategy.to_lowercase().as_str() {
            "activity" => ScoringStrategy::Activity,
            _ => ScoringStrategy::Profile,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub scoring: ScoringStrategyConfig,
    pub contact: ContactScoringConfig,
    pub activity: ActivityScoringConfig,
    pub list: ListHealthConfig,
    pub campaign: BenchmarkConfig,
    pub heatmap: HeatmapConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringStrategyConfig::default(),
            contact: ContactScoringConfig::default(),
            activity: ActivityScoringConfig::default(),
            list: ListHealthConfig::default(),
            campaign: BenchmarkConfig::default(),
            heatmap: HeatmapConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                EngineConfig::default()
            }
        } else {
            EngineConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload).map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(strategy) = env::var("SCORING_STRATEGY") {
            if !strategy.trim().is_empty() {
                self.scoring.strategy = strategy;
            }
        }
        if let Ok(lookback) = env::var("HEATMAP_LOOKBACK_DAYS") {
            if let Ok(value) = lookback.parse::<i64>() {
                self.heatmap.default_lookback_days = value;
            }
        }
        if let Ok(window) = env::var("ACTIVITY_WINDOW_DAYS") {
            if let Ok(value) = window.parse::<i64>() {
                self.activity.window_days = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("ENGINE_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/engine.toml")))
}
