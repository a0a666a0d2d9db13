use crate::app_context::AppContext;
use crate::dashboard::DashboardEvent;

use super::command_def::{DashboardCommand, descriptions};
use super::helpers::render_dashboard;

pub(super) fn route_command(command: DashboardCommand, app_context: &AppContext) -> String {
    match command {
        DashboardCommand::Help => descriptions(),
        DashboardCommand::Show => render_dashboard(&app_context.dashboard.current()),
        DashboardCommand::Export => handle_export(app_context),
        DashboardCommand::Refresh => {
            send(app_context, DashboardEvent::Refresh, "Refresh requested.")
        }
        DashboardCommand::Accounts => handle_accounts(app_context),
        DashboardCommand::Account(account) => {
            let reply = match &account {
                Some(account) => format!("Account set to {}.", account),
                None => "Account filter cleared.".to_string(),
            };
            send(app_context, DashboardEvent::SetAccount(account), &reply)
        }
        DashboardCommand::Status(status) => {
            let reply = format!("Status filter set to {}.", status.label());
            send(app_context, DashboardEvent::SetStatus(status), &reply)
        }
        DashboardCommand::Search(text) => {
            let reply = if text.is_empty() {
                "Search cleared.".to_string()
            } else {
                format!("Searching for {:?}.", text)
            };
            send(app_context, DashboardEvent::SetSearch(text), &reply)
        }
        DashboardCommand::Thresholds(thresholds) => {
            log::info!(
                "thresholds_changed source=console yellow={} red={}",
                thresholds.yellow,
                thresholds.red
            );
            let reply = format!(
                "Thresholds set to yellow {} min, red {} min.",
                thresholds.yellow, thresholds.red
            );
            send(app_context, DashboardEvent::SetThresholds(thresholds), &reply)
        }
    }
}

fn send(app_context: &AppContext, event: DashboardEvent, reply: &str) -> String {
    if app_context.dashboard.trigger(event) {
        reply.to_string()
    } else {
        "Refresh loop is not running; request ignored.".to_string()
    }
}

fn handle_export(app_context: &AppContext) -> String {
    let snapshot = app_context.dashboard.current();
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => json,
        Err(error) => {
            log::warn!("snapshot_export_failed error={}", error);
            format!("Could not build export: {}", error)
        }
    }
}

fn handle_accounts(app_context: &AppContext) -> String {
    let filters = &app_context.config.filters;
    if filters.accounts.is_empty() {
        return "No accounts configured; any account name is accepted.".to_string();
    }

    let selected = app_context.dashboard.current().criteria.account;
    let mut text = String::from("Accounts:");
    for account in &filters.accounts {
        let marker = if selected.as_deref() == Some(account.as_str()) {
            "*"
        } else {
            " "
        };
        text.push_str(&format!("\n {} {}", marker, account));
    }
    text
}
