use crate::pipeline::{AggregateMode, SearchField};

use super::schema::{Config, Filters, Readouts, Sources, Thresholds};

pub(super) fn default_refresh_interval_secs() -> u64 {
    10
}

pub(super) fn default_sources_dir() -> String {
    ".".to_string()
}

pub(super) fn default_agent_status_file() -> String {
    "agent_status.csv".to_string()
}

pub(super) fn default_service_level_file() -> String {
    "sl_data.csv".to_string()
}

pub(super) fn default_dropped_intervals_file() -> String {
    "dropped_intervals.csv".to_string()
}

pub(super) fn default_yellow_threshold() -> f64 {
    10.0
}

pub(super) fn default_red_threshold() -> f64 {
    20.0
}

pub(super) fn default_accounts() -> Vec<String> {
    [
        "101 Account",
        "Non Voice Account",
        "SMB Account",
        "Smiles Account",
        "Prestige Account",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

pub(super) fn default_search_field() -> SearchField {
    SearchField::LoginId
}

pub(super) fn default_dropped_intervals_mode() -> AggregateMode {
    AggregateMode::Latest
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
            sources: Sources::default(),
            thresholds: Thresholds::default(),
            filters: Filters::default(),
            readouts: Readouts::default(),
        }
    }
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            dir: default_sources_dir(),
            agent_status: default_agent_status_file(),
            service_level: default_service_level_file(),
            dropped_intervals: default_dropped_intervals_file(),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            yellow: default_yellow_threshold(),
            red: default_red_threshold(),
        }
    }
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            accounts: default_accounts(),
            initial_account: None,
            search_field: default_search_field(),
        }
    }
}

impl Default for Readouts {
    fn default() -> Self {
        Self {
            dropped_intervals: default_dropped_intervals_mode(),
        }
    }
}
