use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio::time::{Duration, MissedTickBehavior, interval};

use crate::app_context::AppContext;
use crate::config::Config;
use crate::dashboard::{
    DashboardEvent, DashboardSnapshot, DashboardState, PassCompletion, PassError, PassRequest,
    SourceSet, reduce, run_pass,
};
use crate::pipeline::FilterCriteria;

#[derive(Clone)]
pub struct DashboardHandle {
    triggers: mpsc::UnboundedSender<DashboardEvent>,
    snapshots: watch::Receiver<DashboardSnapshot>,
}

impl DashboardHandle {
    // Returns false once the refresh loop is gone.
    pub fn trigger(&self, event: DashboardEvent) -> bool {
        match self.triggers.send(event) {
            Ok(()) => true,
            Err(error) => {
                log::warn!(
                    "dashboard_trigger_dropped reason=refresh_loop_stopped event={:?}",
                    error.0
                );
                false
            }
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.snapshots.clone()
    }

    pub fn current(&self) -> DashboardSnapshot {
        self.snapshots.borrow().clone()
    }
}

pub struct RefreshInputs {
    pub(crate) events: mpsc::UnboundedReceiver<DashboardEvent>,
    loopback: mpsc::UnboundedSender<DashboardEvent>,
    snapshots: watch::Sender<DashboardSnapshot>,
}

pub fn dashboard_channel(initial: DashboardState) -> (DashboardHandle, RefreshInputs) {
    let (triggers, events) = mpsc::unbounded_channel();
    let (snapshots, snapshot_rx) = watch::channel(initial);

    let handle = DashboardHandle {
        triggers: triggers.clone(),
        snapshots: snapshot_rx,
    };
    let inputs = RefreshInputs {
        events,
        loopback: triggers,
        snapshots,
    };
    (handle, inputs)
}

pub fn initial_state(config: &Config) -> DashboardState {
    let criteria = FilterCriteria {
        account: config.filters.startup_account(),
        ..FilterCriteria::default()
    };
    DashboardState::new(criteria, config.thresholds.to_threshold_config())
}

pub(super) fn start_refresh_job(app_context: AppContext, inputs: RefreshInputs) {
    let sources = SourceSet::from_config(&app_context.config);
    let period = Duration::from_secs(app_context.config.refresh_interval_secs);
    log::info!(
        "refresh_job_started interval_secs={} agent_status={} service_level={} dropped_intervals={}",
        period.as_secs(),
        sources.agent_status.display(),
        sources.service_level.display(),
        sources.dropped_intervals.display()
    );

    tokio::spawn(run_refresh_loop(sources, period, inputs));
}

async fn run_refresh_loop(sources: SourceSet, period: Duration, inputs: RefreshInputs) {
    let RefreshInputs {
        mut events,
        loopback,
        snapshots,
    } = inputs;
    let sources = Arc::new(sources);
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut state = snapshots.borrow().clone();
    let mut previous_tick: Option<DateTime<Utc>> = None;

    loop {
        let event = tokio::select! {
            _ = ticker.tick() => {
                let now = Utc::now();
                if let Some(previous) = previous_tick {
                    let elapsed_secs = now.signed_duration_since(previous).num_seconds().max(0);
                    let threshold_secs = (period.as_secs() * 2) as i64;
                    if elapsed_secs > threshold_secs {
                        log::warn!(
                            "refresh_loop_delayed elapsed_secs={} threshold_secs={}",
                            elapsed_secs,
                            threshold_secs
                        );
                    }
                }
                previous_tick = Some(now);
                DashboardEvent::Tick
            }
            received = events.recv() => match received {
                Some(event) => event,
                None => {
                    log::info!("refresh_loop_stopped reason=trigger_channel_closed");
                    return;
                }
            },
        };

        let transition = reduce(state, event, Utc::now());
        state = transition.state;

        if let Some(request) = transition.start_pass {
            spawn_pass(Arc::clone(&sources), request, loopback.clone());
        }

        snapshots.send_replace(state.clone());
    }
}

fn spawn_pass(
    sources: Arc<SourceSet>,
    request: PassRequest,
    loopback: mpsc::UnboundedSender<DashboardEvent>,
) {
    let generation = request.generation;
    let trigger = request.trigger;

    tokio::spawn(async move {
        let started = Instant::now();
        let outcome =
            match tokio::task::spawn_blocking(move || run_pass(&sources, &request, Utc::now()))
                .await
            {
                Ok(outcome) => outcome,
                Err(error) => Err(PassError::Worker(error.to_string())),
            };

        log::debug!(
            "refresh_pass_finished generation={} trigger={:?} ok={} elapsed_ms={}",
            generation,
            trigger,
            outcome.is_ok(),
            started.elapsed().as_millis()
        );

        let completion = DashboardEvent::PassCompleted(PassCompletion {
            generation,
            outcome,
        });
        if loopback.send(completion).is_err() {
            log::warn!(
                "refresh_pass_result_dropped generation={} reason=refresh_loop_stopped",
                generation
            );
        }
    });
}

#[cfg(test)]
mod tests;
