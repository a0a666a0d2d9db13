use thiserror::Error;

use crate::pipeline::ThresholdConfig;

use super::schema::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Validation(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "refresh_interval_secs must be greater than 0".to_string(),
            ));
        }

        for (name, value) in [
            ("sources.dir", &self.sources.dir),
            ("sources.agent_status", &self.sources.agent_status),
            ("sources.service_level", &self.sources.service_level),
            ("sources.dropped_intervals", &self.sources.dropped_intervals),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{} must not be empty",
                    name
                )));
            }
        }

        validate_thresholds(&self.thresholds.to_threshold_config())
            .map_err(ConfigError::Validation)?;

        if self.filters.accounts.iter().any(|account| account.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "filters.accounts must not contain empty names".to_string(),
            ));
        }

        if let Some(initial) = &self.filters.initial_account
            && !self.filters.is_known_account(initial)
        {
            return Err(ConfigError::Validation(format!(
                "filters.initial_account '{}' is not listed in filters.accounts",
                initial
            )));
        }

        Ok(())
    }
}

pub fn validate_thresholds(thresholds: &ThresholdConfig) -> Result<(), String> {
    for (name, value) in [
        ("thresholds.yellow", thresholds.yellow),
        ("thresholds.red", thresholds.red),
    ] {
        if !value.is_finite() || value.is_sign_negative() {
            return Err(format!("{} must be a non-negative number", name));
        }
    }

    if thresholds.yellow > thresholds.red {
        return Err("thresholds.yellow must not exceed thresholds.red".to_string());
    }

    Ok(())
}
