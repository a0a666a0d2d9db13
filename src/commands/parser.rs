use crate::config::{Filters, validate_thresholds};
use crate::pipeline::{StatusFilter, ThresholdConfig};
use crate::source::AgentStatus;

use super::command_def::DashboardCommand;

const ACCOUNT_USAGE_TEXT: &str = "Usage: account <name>|all";
const STATUS_USAGE_TEXT: &str = "Usage: status <name>|all";
const THRESHOLDS_USAGE_TEXT: &str = "Usage: thresholds <yellow> <red>";

/// Parse one console line. Blank lines yield `Ok(None)`.
pub(crate) fn parse_command(
    line: &str,
    filters: &Filters,
) -> Result<Option<DashboardCommand>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (trimmed, ""),
    };

    let command = match keyword.to_lowercase().as_str() {
        "help" => DashboardCommand::Help,
        "show" => DashboardCommand::Show,
        "export" => DashboardCommand::Export,
        "refresh" => DashboardCommand::Refresh,
        "accounts" => DashboardCommand::Accounts,
        "account" => DashboardCommand::Account(parse_account(rest, filters)?),
        "status" => DashboardCommand::Status(parse_status(rest)?),
        "search" => DashboardCommand::Search(rest.to_string()),
        "thresholds" => DashboardCommand::Thresholds(parse_thresholds(rest)?),
        other => {
            return Err(format!(
                "unknown command '{}' (type 'help' for the list)",
                other
            ));
        }
    };

    Ok(Some(command))
}

fn parse_account(raw: &str, filters: &Filters) -> Result<Option<String>, String> {
    if raw.is_empty() {
        return Err(ACCOUNT_USAGE_TEXT.to_string());
    }

    if raw.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    if !filters.is_known_account(raw) {
        return Err(format!(
            "unknown account '{}' (expected one of: {})",
            raw,
            filters.accounts.join(", ")
        ));
    }

    Ok(Some(raw.to_string()))
}

fn parse_status(raw: &str) -> Result<StatusFilter, String> {
    if raw.is_empty() {
        return Err(STATUS_USAGE_TEXT.to_string());
    }

    if raw.eq_ignore_ascii_case("all") {
        return Ok(StatusFilter::All);
    }

    raw.parse::<AgentStatus>().map(StatusFilter::Only)
}

fn parse_thresholds(raw: &str) -> Result<ThresholdConfig, String> {
    let values: Vec<&str> = raw.split_whitespace().collect();
    let [yellow, red] = values.as_slice() else {
        return Err(THRESHOLDS_USAGE_TEXT.to_string());
    };

    let yellow = parse_minutes("yellow", yellow)?;
    let red = parse_minutes("red", red)?;
    let thresholds = ThresholdConfig::new(yellow, red);
    validate_thresholds(&thresholds)?;
    Ok(thresholds)
}

fn parse_minutes(name: &str, raw: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .map_err(|_| format!("{} must be a number of minutes, got '{}'", name, raw))
}
