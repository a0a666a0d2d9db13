use std::fs;
use std::path::Path;

use tempfile::tempdir;
use tokio::time::{Duration, timeout};

use crate::config::Config;
use crate::dashboard::{DashboardEvent, SourceSet};
use crate::pipeline::{AggregateMode, AggregateValue, SearchField, StatusFilter};
use crate::source::AgentStatus;

use super::{dashboard_channel, initial_state, run_refresh_loop};

fn write_sources(dir: &Path) -> SourceSet {
    fs::write(
        dir.join("agent_status.csv"),
        "Login ID,Account,Status,Duration (min)\n\
         a1,101 Account,Available,5\n\
         a2,101 Account,AUX,15\n\
         b1,SMB Account,Break,25\n",
    )
    .expect("agent csv");
    fs::write(
        dir.join("sl_data.csv"),
        "Account,Service Level\n101 Account,71.0\n101 Account,74.5\n",
    )
    .expect("sl csv");
    fs::write(
        dir.join("dropped_intervals.csv"),
        "Account,Dropped Intervals\n101 Account,1\n",
    )
    .expect("dropped csv");

    SourceSet {
        agent_status: dir.join("agent_status.csv"),
        service_level: dir.join("sl_data.csv"),
        dropped_intervals: dir.join("dropped_intervals.csv"),
        search_field: SearchField::LoginId,
        dropped_intervals_mode: AggregateMode::Latest,
    }
}

#[test]
fn initial_state_uses_configured_account_and_thresholds() {
    let config = Config::default();
    let state = initial_state(&config);

    assert_eq!(state.criteria.account.as_deref(), Some("101 Account"));
    assert_eq!(state.criteria.status, StatusFilter::All);
    assert_eq!(state.thresholds.yellow, 10.0);
    assert_eq!(state.thresholds.red, 20.0);
    assert!(state.view.is_none());
}

#[tokio::test]
async fn first_tick_publishes_a_view_immediately() {
    let temp = tempdir().expect("tempdir should be created");
    let sources = write_sources(temp.path());
    let (handle, inputs) = dashboard_channel(initial_state(&Config::default()));
    tokio::spawn(run_refresh_loop(sources, Duration::from_secs(3600), inputs));

    let mut snapshots = handle.subscribe();
    let snapshot = timeout(
        Duration::from_secs(10),
        snapshots.wait_for(|snapshot| snapshot.view.is_some()),
    )
    .await
    .expect("first pass should finish")
    .expect("refresh loop should stay alive")
    .clone();

    let view = snapshot.view.expect("view published");
    assert_eq!(view.agents.len(), 2);
    assert_eq!(
        snapshot.service_level.map(|readout| readout.value),
        Some(AggregateValue::Value(74.5))
    );
    assert_eq!(snapshot.counters.applied, 1);
}

#[tokio::test]
async fn manual_trigger_reruns_pass_with_new_criteria() {
    let temp = tempdir().expect("tempdir should be created");
    let sources = write_sources(temp.path());
    let (handle, inputs) = dashboard_channel(initial_state(&Config::default()));
    tokio::spawn(run_refresh_loop(sources, Duration::from_secs(3600), inputs));

    assert!(handle.trigger(DashboardEvent::SetStatus(StatusFilter::Only(
        AgentStatus::Aux
    ))));

    let mut snapshots = handle.subscribe();
    let snapshot = timeout(
        Duration::from_secs(10),
        snapshots.wait_for(|snapshot| {
            snapshot.view.as_ref().is_some_and(|view| {
                view.criteria.status == StatusFilter::Only(AgentStatus::Aux)
            })
        }),
    )
    .await
    .expect("filtered pass should finish")
    .expect("refresh loop should stay alive")
    .clone();

    let view = snapshot.view.expect("view published");
    assert_eq!(view.agents.len(), 1);
    assert_eq!(view.agents[0].row.login_id, "a2");
    assert_eq!(handle.current().criteria.status, StatusFilter::Only(AgentStatus::Aux));
}

#[tokio::test]
async fn missing_agent_file_marks_snapshot_stale() {
    let temp = tempdir().expect("tempdir should be created");
    let mut sources = write_sources(temp.path());
    sources.agent_status = temp.path().join("absent.csv");
    let (handle, inputs) = dashboard_channel(initial_state(&Config::default()));
    tokio::spawn(run_refresh_loop(sources, Duration::from_secs(3600), inputs));

    let mut snapshots = handle.subscribe();
    let snapshot = timeout(
        Duration::from_secs(10),
        snapshots.wait_for(|snapshot| snapshot.last_failure.is_some()),
    )
    .await
    .expect("failed pass should be recorded")
    .expect("refresh loop should stay alive")
    .clone();

    assert!(snapshot.is_stale());
    assert!(snapshot.view.is_none());
    assert_eq!(
        snapshot.last_failure.map(|failure| failure.kind),
        Some("not_found")
    );
}
