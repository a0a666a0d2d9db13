use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::source::schema::{ACCOUNT, AGENT_NAME, LOGIN_ID, STATUS};
use crate::source::{AgentStatus, ResolvedColumns, text_column};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AgentStatus),
}

impl StatusFilter {
    pub fn label(&self) -> &str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.as_str(),
        }
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    LoginId,
    AgentName,
}

impl SearchField {
    fn logical_field(self) -> &'static str {
        match self {
            SearchField::LoginId => LOGIN_ID,
            SearchField::AgentName => AGENT_NAME,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FilterCriteria {
    pub account: Option<String>,
    pub status: StatusFilter,
    pub search_text: String,
}

pub fn apply_filters(
    frame: &DataFrame,
    columns: &ResolvedColumns,
    criteria: &FilterCriteria,
    search_field: SearchField,
) -> PolarsResult<DataFrame> {
    let mut current = frame.clone();

    if let Some(account) = criteria.account.as_deref()
        && let Some(column) = columns.get(ACCOUNT)
    {
        let mask = equality_mask(&current, column, account)?;
        current = current.filter(&mask)?;
    }

    if let StatusFilter::Only(status) = &criteria.status
        && let Some(column) = columns.get(STATUS)
    {
        let mask = equality_mask(&current, column, status.as_str())?;
        current = current.filter(&mask)?;
    }

    let needle = criteria.search_text.trim().to_lowercase();
    if !needle.is_empty() {
        current = match columns.get(search_field.logical_field()) {
            Some(column) => {
                let mask = substring_mask(&current, column, &needle)?;
                current.filter(&mask)?
            }
            None => current.clear(),
        };
    }

    Ok(current)
}

fn equality_mask(frame: &DataFrame, column: &str, wanted: &str) -> PolarsResult<BooleanChunked> {
    let values = &text_column(frame, column)?;
    Ok(values
        .into_iter()
        .map(|value| value == Some(wanted))
        .collect())
}

// Null cells never match.
fn substring_mask(frame: &DataFrame, column: &str, needle: &str) -> PolarsResult<BooleanChunked> {
    let values = &text_column(frame, column)?;
    Ok(values
        .into_iter()
        .map(|value| value.is_some_and(|text| text.to_lowercase().contains(needle)))
        .collect())
}
