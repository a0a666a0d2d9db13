use crate::pipeline::{StatusFilter, ThresholdConfig};

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardCommand {
    Help,
    Show,
    Export,
    Refresh,
    Account(Option<String>),
    Accounts,
    Status(StatusFilter),
    Search(String),
    Thresholds(ThresholdConfig),
}

pub(crate) const COMMAND_DESCRIPTIONS: &[(&str, &str)] = &[
    ("help", "Show this help menu."),
    ("show", "Print the current dashboard."),
    ("export", "Print the current dashboard snapshot as JSON."),
    ("refresh", "Re-read the source files now."),
    ("account <name>|all", "Select an account, or clear the account filter."),
    ("accounts", "List the configured accounts."),
    ("status <name>|all", "Show only agents in one status, e.g. status aux."),
    ("search [text]", "Filter by search text; without text the search is cleared."),
    ("thresholds <yellow> <red>", "Set the warning and critical minutes."),
];

pub(crate) fn descriptions() -> String {
    let width = COMMAND_DESCRIPTIONS
        .iter()
        .map(|(usage, _)| usage.len())
        .max()
        .unwrap_or(0);

    let mut text = String::from("Available commands:");
    for (usage, description) in COMMAND_DESCRIPTIONS {
        text.push_str(&format!("\n  {:<width$}  {}", usage, description, width = width));
    }
    text
}
