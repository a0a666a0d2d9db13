use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::pipeline::{
    AggregateValue, FilterCriteria, Severity, StatusFilter, ThresholdConfig,
};
use crate::source::SourceError;

use super::pass::{DashboardView, PassError, PassOutput, PassRequest, PassTrigger};

#[derive(Debug)]
pub enum DashboardEvent {
    Tick,
    Refresh,
    SetAccount(Option<String>),
    SetStatus(StatusFilter),
    SetSearch(String),
    SetThresholds(ThresholdConfig),
    PassCompleted(PassCompletion),
}

#[derive(Debug)]
pub struct PassCompletion {
    pub generation: u64,
    pub outcome: Result<PassOutput, PassError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PassPhase {
    Idle,
    Reading {
        generation: u64,
        trigger: PassTrigger,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readout {
    pub value: AggregateValue,
    pub account: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub last_error: Option<String>,
}

impl Readout {
    pub fn is_current_for(&self, account: Option<&str>) -> bool {
        self.last_error.is_none() && self.account.as_deref() == account
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassFailure {
    pub at: DateTime<Utc>,
    pub generation: u64,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassCounters {
    pub started: u64,
    pub applied: u64,
    pub failed: u64,
    pub dropped_ticks: u64,
    pub coalesced_triggers: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardState {
    pub criteria: FilterCriteria,
    pub thresholds: ThresholdConfig,
    pub phase: PassPhase,
    pub view: Option<Arc<DashboardView>>,
    pub service_level: Option<Readout>,
    pub dropped_intervals: Option<Readout>,
    pub last_success_at: Option<DateTime<Utc>>,
    pub last_failure: Option<PassFailure>,
    pub counters: PassCounters,
    #[serde(skip)]
    follow_up_pending: bool,
    #[serde(skip)]
    next_generation: u64,
}

pub type DashboardSnapshot = DashboardState;

pub struct Transition {
    pub state: DashboardState,
    pub start_pass: Option<PassRequest>,
}

impl DashboardState {
    pub fn new(criteria: FilterCriteria, thresholds: ThresholdConfig) -> Self {
        Self {
            criteria,
            thresholds,
            phase: PassPhase::Idle,
            view: None,
            service_level: None,
            dropped_intervals: None,
            last_success_at: None,
            last_failure: None,
            counters: PassCounters::default(),
            follow_up_pending: false,
            next_generation: 0,
        }
    }

    pub fn is_reading(&self) -> bool {
        matches!(self.phase, PassPhase::Reading { .. })
    }

    pub fn is_stale(&self) -> bool {
        match (&self.last_failure, self.last_success_at) {
            (Some(failure), Some(success)) => failure.at >= success,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    fn begin_pass(&mut self, trigger: PassTrigger) -> PassRequest {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.phase = PassPhase::Reading {
            generation,
            trigger,
        };
        self.counters.started += 1;

        PassRequest {
            generation,
            trigger,
            criteria: self.criteria.clone(),
            thresholds: self.thresholds,
        }
    }

    /// Manual triggers never get lost: with a pass in flight they turn into
    /// a single follow-up pass that starts once it completes.
    fn request_manual_pass(&mut self) -> Option<PassRequest> {
        if self.is_reading() {
            if self.follow_up_pending {
                self.counters.coalesced_triggers += 1;
            }
            self.follow_up_pending = true;
            return None;
        }

        Some(self.begin_pass(PassTrigger::Manual))
    }

    fn apply_output(&mut self, generation: u64, output: PassOutput, now: DateTime<Utc>) {
        let PassOutput {
            view,
            service_level,
            dropped_intervals,
        } = output;

        tracing::info!(
            target: "refresh",
            module = "refresh",
            generation,
            source_rows = view.source_rows,
            shown_rows = view.agents.len(),
            warning = view.count_by_severity(Severity::Warning),
            critical = view.count_by_severity(Severity::Critical),
            yellow = view.thresholds.yellow,
            red = view.thresholds.red,
            "refresh_pass_applied"
        );

        let account = view.criteria.account.clone();
        self.view = Some(Arc::new(view));
        merge_readout(
            &mut self.service_level,
            service_level,
            "service_level",
            account.as_deref(),
            now,
        );
        merge_readout(
            &mut self.dropped_intervals,
            dropped_intervals,
            "dropped_intervals",
            account.as_deref(),
            now,
        );
        self.last_success_at = Some(now);
        self.counters.applied += 1;
    }

    fn record_failure(&mut self, generation: u64, error: PassError, now: DateTime<Utc>) {
        log::warn!(
            "refresh_pass_failed generation={} kind={} error={} action=keep_previous_view",
            generation,
            error.kind(),
            error
        );
        self.last_failure = Some(PassFailure {
            at: now,
            generation,
            kind: error.kind(),
            message: error.to_string(),
        });
        self.counters.failed += 1;
    }
}

fn merge_readout(
    slot: &mut Option<Readout>,
    result: Result<AggregateValue, SourceError>,
    name: &str,
    account: Option<&str>,
    now: DateTime<Utc>,
) {
    match result {
        Ok(value) => {
            *slot = Some(Readout {
                value,
                account: account.map(str::to_string),
                updated_at: now,
                last_error: None,
            });
        }
        Err(error) => {
            log::warn!(
                "readout_refresh_failed readout={} kind={} error={} action=keep_previous_value",
                name,
                error.kind(),
                error
            );
            if let Some(readout) = slot {
                readout.last_error = Some(error.to_string());
            }
        }
    }
}

pub fn reduce(mut state: DashboardState, event: DashboardEvent, now: DateTime<Utc>) -> Transition {
    let start_pass = match event {
        DashboardEvent::Tick => {
            if state.is_reading() {
                state.counters.dropped_ticks += 1;
                log::debug!(
                    "refresh_tick_dropped reason=pass_in_flight dropped_total={}",
                    state.counters.dropped_ticks
                );
                None
            } else {
                Some(state.begin_pass(PassTrigger::Timer))
            }
        }
        DashboardEvent::Refresh => state.request_manual_pass(),
        DashboardEvent::SetAccount(account) => {
            state.criteria.account = account;
            state.request_manual_pass()
        }
        DashboardEvent::SetStatus(status) => {
            state.criteria.status = status;
            state.request_manual_pass()
        }
        DashboardEvent::SetSearch(text) => {
            state.criteria.search_text = text;
            state.request_manual_pass()
        }
        DashboardEvent::SetThresholds(thresholds) => {
            state.thresholds = thresholds;
            state.request_manual_pass()
        }
        DashboardEvent::PassCompleted(completion) => {
            let in_flight = match state.phase {
                PassPhase::Reading { generation, .. } => Some(generation),
                PassPhase::Idle => None,
            };
            if in_flight != Some(completion.generation) {
                log::warn!(
                    "refresh_completion_ignored generation={} in_flight={:?}",
                    completion.generation,
                    in_flight
                );
                return Transition {
                    state,
                    start_pass: None,
                };
            }

            state.phase = PassPhase::Idle;
            match completion.outcome {
                Ok(output) => state.apply_output(completion.generation, output, now),
                Err(error) => state.record_failure(completion.generation, error, now),
            }

            if state.follow_up_pending {
                state.follow_up_pending = false;
                Some(state.begin_pass(PassTrigger::Manual))
            } else {
                None
            }
        }
    };

    Transition { state, start_pass }
}
