use chrono::{DateTime, Utc};

use crate::dashboard::{DashboardSnapshot, DashboardView, Readout};
use crate::pipeline::{AggregateValue, FilterCriteria, Severity};

const NO_VIEW_TEXT: &str = "Waiting for the first successful refresh...";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PresentedKey {
    refreshed_at: Option<DateTime<Utc>>,
    failed_generation: Option<u64>,
    readouts: [Option<DateTime<Utc>>; 2],
}

pub(crate) fn presented_key(snapshot: &DashboardSnapshot) -> PresentedKey {
    PresentedKey {
        refreshed_at: snapshot.view.as_ref().map(|view| view.refreshed_at),
        failed_generation: snapshot.last_failure.as_ref().map(|failure| failure.generation),
        readouts: [
            snapshot.service_level.as_ref().map(|readout| readout.updated_at),
            snapshot.dropped_intervals.as_ref().map(|readout| readout.updated_at),
        ],
    }
}

pub(crate) fn render_dashboard(snapshot: &DashboardSnapshot) -> String {
    let shown = snapshot
        .view
        .as_ref()
        .map(|view| &view.criteria)
        .unwrap_or(&snapshot.criteria);
    let mut lines = vec![format!("== Agent Status | {} ==", criteria_text(shown))];

    if *shown != snapshot.criteria {
        lines.push(format!(
            "Requested: {} (not applied yet)",
            criteria_text(&snapshot.criteria)
        ));
    }

    if let Some(failure) = &snapshot.last_failure
        && snapshot.is_stale()
    {
        lines.push(format!(
            "STALE: last refresh failed at {} ({})",
            failure.at.to_rfc3339(),
            failure.message
        ));
    }

    let selected = snapshot.criteria.account.as_deref();
    lines.push(format!(
        "SL %: {}    Dropped Intervals: {}",
        readout_text(snapshot.service_level.as_ref(), selected, percent_text),
        readout_text(snapshot.dropped_intervals.as_ref(), selected, count_text)
    ));
    lines.push(format!(
        "Thresholds: yellow {} min, red {} min",
        snapshot.thresholds.yellow, snapshot.thresholds.red
    ));

    match &snapshot.view {
        Some(view) => {
            lines.push(format!(
                "Refreshed: {}    Showing {} of {} agents (warning {}, critical {})",
                view.refreshed_at.to_rfc3339(),
                view.agents.len(),
                view.source_rows,
                view.count_by_severity(Severity::Warning),
                view.count_by_severity(Severity::Critical)
            ));
            lines.push(String::new());
            lines.push(render_table(view));
        }
        None => lines.push(NO_VIEW_TEXT.to_string()),
    }

    lines.join("\n")
}

fn criteria_text(criteria: &FilterCriteria) -> String {
    let mut text = format!(
        "account: {} | status: {}",
        criteria.account.as_deref().unwrap_or("All"),
        criteria.status.label()
    );
    if !criteria.search_text.trim().is_empty() {
        text.push_str(&format!(" | search: {:?}", criteria.search_text.trim()));
    }
    text
}

fn readout_text(
    readout: Option<&Readout>,
    selected: Option<&str>,
    format_value: fn(AggregateValue) -> String,
) -> String {
    let Some(readout) = readout else {
        return AggregateValue::NoData.to_string();
    };

    let value = format_value(readout.value);
    if readout.is_current_for(selected) {
        return value;
    }

    match readout.account.as_deref() {
        Some(account) if readout.account.as_deref() != selected => {
            format!("{} (stale, account {})", value, account)
        }
        _ => format!("{} (stale)", value),
    }
}

fn percent_text(value: AggregateValue) -> String {
    value.to_string()
}

// Dropped intervals are counts.
fn count_text(value: AggregateValue) -> String {
    match value {
        AggregateValue::Value(count) if count.fract() == 0.0 => format!("{}", count as i64),
        AggregateValue::Value(count) => count.to_string(),
        AggregateValue::NoData => value.to_string(),
    }
}

fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Normal => "  ",
        Severity::Warning => "! ",
        Severity::Critical => "!!",
    }
}

pub(crate) fn render_table(view: &DashboardView) -> String {
    let mut widths: Vec<usize> = view.columns.iter().map(|name| name.chars().count()).collect();
    for agent in &view.agents {
        for (index, cell) in agent.cells.iter().enumerate() {
            if let Some(width) = widths.get_mut(index) {
                let len = cell.as_deref().unwrap_or("").chars().count();
                *width = (*width).max(len);
            }
        }
    }

    let format_row = |marker: &str, cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        format!("{} | {}", marker, padded.join(" | ")).trim_end().to_string()
    };

    let mut rows = vec![format_row(
        "  ",
        view.columns.iter().map(String::as_str).collect(),
    )];
    if view.agents.is_empty() {
        rows.push("   (no agents match the current filters)".to_string());
    }
    for agent in &view.agents {
        let cells = agent
            .cells
            .iter()
            .map(|cell| cell.as_deref().unwrap_or(""))
            .collect();
        rows.push(format_row(severity_marker(agent.severity), cells));
    }

    rows.join("\n")
}
