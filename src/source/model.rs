use std::fmt;
use std::str::FromStr;

use polars::prelude::*;
use serde::{Serialize, Serializer};

use super::reader::text_column;
use super::schema::{ACCOUNT, AGENT_NAME, DURATION_MINUTES, LOGIN_ID, ResolvedColumns, STATUS};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AgentStatus {
    Available,
    Aux,
    Break,
    Offline,
    UnalignedAux,
    /// A status string the upstream writer produced that is not in the known set.
    Unrecognized(String),
}

impl AgentStatus {
    pub const KNOWN: [AgentStatus; 5] = [
        AgentStatus::Available,
        AgentStatus::Aux,
        AgentStatus::Break,
        AgentStatus::Offline,
        AgentStatus::UnalignedAux,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            AgentStatus::Available => "Available",
            AgentStatus::Aux => "AUX",
            AgentStatus::Break => "Break",
            AgentStatus::Offline => "Offline",
            AgentStatus::UnalignedAux => "Unaligned AUX",
            AgentStatus::Unrecognized(raw) => raw,
        }
    }

    pub fn from_cell(raw: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|status| status.as_str() == raw)
            .unwrap_or_else(|| AgentStatus::Unrecognized(raw.to_string()))
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AgentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Operator input for a known status. Matching is case-insensitive so that
// `aux` and `unaligned aux` are accepted at the console.
impl FromStr for AgentStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Self::KNOWN
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!(
                    "unknown status '{}' (expected one of: {})",
                    wanted,
                    Self::KNOWN
                        .iter()
                        .map(AgentStatus::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentStatusRow {
    pub login_id: String,
    pub agent_name: Option<String>,
    pub account: Option<String>,
    pub status: AgentStatus,
    pub duration_minutes: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentRecord {
    pub cells: Vec<Option<String>>,
    pub row: AgentStatusRow,
}

pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
}

pub fn agent_records(frame: &DataFrame, columns: &ResolvedColumns) -> PolarsResult<Vec<AgentRecord>> {
    let all_columns = frame
        .get_column_names()
        .into_iter()
        .map(|name| text_column(frame, name.as_str()))
        .collect::<PolarsResult<Vec<_>>>()?;

    let optional = |field: &str| -> PolarsResult<Option<StringChunked>> {
        columns
            .get(field)
            .map(|name| text_column(frame, name))
            .transpose()
    };
    let required = |field: &str| -> PolarsResult<StringChunked> {
        let name = columns.get(field).ok_or_else(|| {
            PolarsError::ColumnNotFound(format!("logical field {} is not bound", field).into())
        })?;
        text_column(frame, name)
    };

    let login_ids = required(LOGIN_ID)?;
    let statuses = required(STATUS)?;
    let durations = required(DURATION_MINUTES)?;
    let accounts = optional(ACCOUNT)?;
    let agent_names = optional(AGENT_NAME)?;

    let mut records = Vec::with_capacity(frame.height());
    for i in 0..frame.height() {
        let cells = all_columns
            .iter()
            .map(|column| column.get(i).map(str::to_string))
            .collect();

        let row = AgentStatusRow {
            login_id: login_ids.get(i).unwrap_or_default().to_string(),
            agent_name: agent_names
                .as_ref()
                .and_then(|column| column.get(i))
                .map(str::to_string),
            account: accounts
                .as_ref()
                .and_then(|column| column.get(i))
                .map(str::to_string),
            status: AgentStatus::from_cell(statuses.get(i).unwrap_or_default()),
            duration_minutes: parse_number(durations.get(i)),
        };

        records.push(AgentRecord { cells, row });
    }

    Ok(records)
}
