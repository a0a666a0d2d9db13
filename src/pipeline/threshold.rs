use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Red is checked before yellow; both bounds are inclusive.
pub fn classify(value: f64, yellow: f64, red: f64) -> Severity {
    if value >= red {
        Severity::Critical
    } else if value >= yellow {
        Severity::Warning
    } else {
        Severity::Normal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub yellow: f64,
    pub red: f64,
}

impl ThresholdConfig {
    pub fn new(yellow: f64, red: f64) -> Self {
        Self { yellow, red }
    }

    pub fn classify(&self, value: f64) -> Severity {
        classify(value, self.yellow, self.red)
    }

    pub fn classify_cell(&self, raw: Option<&str>) -> Severity {
        match raw.map(str::trim).map(str::parse::<f64>) {
            Some(Ok(value)) => self.classify(value),
            Some(Err(_)) => {
                log::debug!("duration_unparseable value={:?} severity=normal", raw);
                Severity::Normal
            }
            None => Severity::Normal,
        }
    }
}
