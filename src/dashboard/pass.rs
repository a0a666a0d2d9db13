use std::path::PathBuf;

use chrono::{DateTime, Utc};
use polars::prelude::PolarsError;
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::pipeline::{
    AggregateMode, AggregateValue, FilterCriteria, SearchField, Severity, ThresholdConfig,
    aggregate_for_account, apply_filters,
};
use crate::source::schema::{ACCOUNT, DROPPED_INTERVALS, DURATION_MINUTES, SERVICE_LEVEL_PERCENT};
use crate::source::{
    AGENT_STATUS_SCHEMA, AgentStatusRow, DROPPED_INTERVALS_SCHEMA, SERVICE_LEVEL_SCHEMA,
    SourceError, TableSchema, agent_records, read_snapshot,
};

#[derive(Debug, Clone)]
pub struct SourceSet {
    pub agent_status: PathBuf,
    pub service_level: PathBuf,
    pub dropped_intervals: PathBuf,
    pub search_field: SearchField,
    pub dropped_intervals_mode: AggregateMode,
}

impl SourceSet {
    pub fn from_config(config: &Config) -> Self {
        Self {
            agent_status: config.sources.agent_status_path(),
            service_level: config.sources.service_level_path(),
            dropped_intervals: config.sources.dropped_intervals_path(),
            search_field: config.filters.search_field,
            dropped_intervals_mode: config.readouts.dropped_intervals,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassTrigger {
    Timer,
    Manual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PassRequest {
    pub generation: u64,
    pub trigger: PassTrigger,
    pub criteria: FilterCriteria,
    pub thresholds: ThresholdConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentView {
    pub row: AgentStatusRow,
    pub cells: Vec<Option<String>>,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub columns: Vec<String>,
    pub agents: Vec<AgentView>,
    pub source_rows: usize,
    pub criteria: FilterCriteria,
    pub thresholds: ThresholdConfig,
    pub refreshed_at: DateTime<Utc>,
}

impl DashboardView {
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.agents
            .iter()
            .filter(|agent| agent.severity == severity)
            .count()
    }
}

#[derive(Debug)]
pub struct PassOutput {
    pub view: DashboardView,
    pub service_level: Result<AggregateValue, SourceError>,
    pub dropped_intervals: Result<AggregateValue, SourceError>,
}

#[derive(Debug, Error)]
pub enum PassError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("failed to filter agent table: {0}")]
    Frame(#[from] PolarsError),
    #[error("refresh worker did not finish: {0}")]
    Worker(String),
}

impl PassError {
    pub fn kind(&self) -> &'static str {
        match self {
            PassError::Source(error) => error.kind(),
            PassError::Frame(_) => "frame",
            PassError::Worker(_) => "worker",
        }
    }
}

pub fn run_pass(
    sources: &SourceSet,
    request: &PassRequest,
    now: DateTime<Utc>,
) -> Result<PassOutput, PassError> {
    let snapshot = read_snapshot(&sources.agent_status, &AGENT_STATUS_SCHEMA)?;
    let filtered = apply_filters(
        &snapshot.frame,
        &snapshot.columns,
        &request.criteria,
        sources.search_field,
    )?;

    let duration_index = snapshot
        .columns
        .get(DURATION_MINUTES)
        .and_then(|name| {
            filtered
                .get_column_names()
                .iter()
                .position(|column| column.as_str() == name)
        });

    let agents = agent_records(&filtered, &snapshot.columns)?
        .into_iter()
        .map(|record| {
            let duration_cell = duration_index
                .and_then(|index| record.cells.get(index))
                .and_then(|cell| cell.as_deref());
            let severity = request.thresholds.classify_cell(duration_cell);
            AgentView {
                row: record.row,
                cells: record.cells,
                severity,
            }
        })
        .collect();

    let view = DashboardView {
        columns: filtered
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect(),
        agents,
        source_rows: snapshot.height(),
        criteria: request.criteria.clone(),
        thresholds: request.thresholds,
        refreshed_at: now,
    };

    let account = request.criteria.account.as_deref();
    let service_level = read_readout(
        &sources.service_level,
        &SERVICE_LEVEL_SCHEMA,
        SERVICE_LEVEL_PERCENT,
        account,
        AggregateMode::Latest,
    );
    let dropped_intervals = read_readout(
        &sources.dropped_intervals,
        &DROPPED_INTERVALS_SCHEMA,
        DROPPED_INTERVALS,
        account,
        sources.dropped_intervals_mode,
    );

    Ok(PassOutput {
        view,
        service_level,
        dropped_intervals,
    })
}

fn read_readout(
    path: &std::path::Path,
    schema: &TableSchema,
    value_field: &str,
    account: Option<&str>,
    mode: AggregateMode,
) -> Result<AggregateValue, SourceError> {
    let Some(account) = account else {
        return Ok(AggregateValue::NoData);
    };

    let snapshot = read_snapshot(path, schema)?;
    let (Some(account_column), Some(value_column)) =
        (snapshot.columns.get(ACCOUNT), snapshot.columns.get(value_field))
    else {
        return Ok(AggregateValue::NoData);
    };

    Ok(aggregate_for_account(
        &snapshot.frame,
        account_column,
        value_column,
        account,
        mode,
    ))
}
