use crate::app_context::AppContext;
use crate::config::Config;
use crate::dashboard::DashboardEvent;
use crate::jobs::{RefreshInputs, dashboard_channel, initial_state};
use crate::pipeline::{StatusFilter, ThresholdConfig};
use crate::source::AgentStatus;

use super::handler::answer;

fn app() -> (AppContext, RefreshInputs) {
    let config = Config::default();
    let (dashboard, inputs) = dashboard_channel(initial_state(&config));
    (AppContext::new(config, "dashboard.toml", dashboard), inputs)
}

#[test]
fn status_command_sends_filter_change() {
    let (app, mut inputs) = app();

    let reply = answer("status aux", &app).expect("reply");
    assert_eq!(reply, "Status filter set to AUX.");

    match inputs.events.try_recv() {
        Ok(DashboardEvent::SetStatus(status)) => {
            assert_eq!(status, StatusFilter::Only(AgentStatus::Aux));
        }
        other => panic!("expected status trigger, got {:?}", other),
    }
}

#[test]
fn thresholds_command_sends_new_thresholds() {
    let (app, mut inputs) = app();

    let reply = answer("thresholds 4 9", &app).expect("reply");
    assert_eq!(reply, "Thresholds set to yellow 4 min, red 9 min.");
    match inputs.events.try_recv() {
        Ok(DashboardEvent::SetThresholds(thresholds)) => {
            assert_eq!(thresholds, ThresholdConfig::new(4.0, 9.0));
        }
        other => panic!("expected threshold trigger, got {:?}", other),
    }
}

#[test]
fn invalid_input_reports_error_without_trigger() {
    let (app, mut inputs) = app();

    let reply = answer("thresholds 9 4", &app).expect("reply");
    assert!(reply.starts_with("error: "));
    assert!(answer("", &app).is_none());
    assert!(inputs.events.try_recv().is_err());
}

#[test]
fn accounts_marks_the_selected_one() {
    let (app, _inputs) = app();

    let reply = answer("accounts", &app).expect("reply");
    assert!(reply.contains("* 101 Account"));
    assert!(reply.contains("  SMB Account"));
}

#[test]
fn export_prints_snapshot_json() {
    let (app, _inputs) = app();

    let reply = answer("export", &app).expect("reply");
    let json: serde_json::Value = serde_json::from_str(&reply).expect("valid json");
    assert_eq!(json["criteria"]["account"], "101 Account");
    assert_eq!(json["criteria"]["status"], "All");
    assert_eq!(json["phase"]["phase"], "idle");
    assert!(json["view"].is_null());
}
