use std::path::PathBuf;

use serde::Deserialize;

use crate::pipeline::{AggregateMode, SearchField, ThresholdConfig};

use super::defaults::*;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default)]
    pub sources: Sources,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub filters: Filters,
    #[serde(default)]
    pub readouts: Readouts,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub thresholds: ThresholdConfig,
}

impl RuntimeConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            thresholds: config.thresholds.to_threshold_config(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sources {
    #[serde(default = "default_sources_dir")]
    pub dir: String,
    #[serde(default = "default_agent_status_file")]
    pub agent_status: String,
    #[serde(default = "default_service_level_file")]
    pub service_level: String,
    #[serde(default = "default_dropped_intervals_file")]
    pub dropped_intervals: String,
}

impl Sources {
    pub fn agent_status_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.agent_status)
    }

    pub fn service_level_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.service_level)
    }

    pub fn dropped_intervals_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.dropped_intervals)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_yellow_threshold")]
    pub yellow: f64,
    #[serde(default = "default_red_threshold")]
    pub red: f64,
}

impl Thresholds {
    pub fn to_threshold_config(&self) -> ThresholdConfig {
        ThresholdConfig::new(self.yellow, self.red)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Filters {
    #[serde(default = "default_accounts")]
    pub accounts: Vec<String>,
    #[serde(default)]
    pub initial_account: Option<String>,
    #[serde(default = "default_search_field")]
    pub search_field: SearchField,
}

impl Filters {
    pub fn startup_account(&self) -> Option<String> {
        self.initial_account
            .clone()
            .or_else(|| self.accounts.first().cloned())
    }

    pub fn is_known_account(&self, account: &str) -> bool {
        self.accounts.is_empty() || self.accounts.iter().any(|known| known == account)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Readouts {
    #[serde(default = "default_dropped_intervals_mode")]
    pub dropped_intervals: AggregateMode,
}
