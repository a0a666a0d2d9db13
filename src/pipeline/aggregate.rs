use std::fmt;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::source::{parse_number, text_column};

/// Result of a per-account lookup. `NoData` is a valid, empty answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AggregateValue {
    Value(f64),
    NoData,
}

impl fmt::Display for AggregateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateValue::Value(value) => write!(f, "{:.2}", value),
            AggregateValue::NoData => f.write_str("No Data Available"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateMode {
    Latest,
    Sum,
}

fn account_values(
    frame: &DataFrame,
    account_column: &str,
    value_column: &str,
    account: &str,
) -> Option<Vec<Option<String>>> {
    let accounts = text_column(frame, account_column).ok()?;
    let values = text_column(frame, value_column).ok()?;

    Some(
        accounts
            .into_iter()
            .zip(values.into_iter())
            .filter(|(row_account, _)| *row_account == Some(account))
            .map(|(_, value)| value.map(str::to_string))
            .collect(),
    )
}

pub fn latest_for_account(
    frame: &DataFrame,
    account_column: &str,
    value_column: &str,
    account: &str,
) -> AggregateValue {
    let Some(values) = account_values(frame, account_column, value_column, account) else {
        return AggregateValue::NoData;
    };

    match values.last() {
        Some(last) => match parse_number(last.as_deref()) {
            Some(value) => AggregateValue::Value(value),
            None => {
                log::debug!(
                    "aggregate_latest_unparseable account={} column={} value={:?}",
                    account,
                    value_column,
                    last
                );
                AggregateValue::NoData
            }
        },
        None => AggregateValue::NoData,
    }
}

pub fn sum_for_account(
    frame: &DataFrame,
    account_column: &str,
    value_column: &str,
    account: &str,
) -> AggregateValue {
    let Some(values) = account_values(frame, account_column, value_column, account) else {
        return AggregateValue::NoData;
    };

    let numbers: Vec<f64> = values
        .iter()
        .filter_map(|value| parse_number(value.as_deref()))
        .collect();

    if numbers.is_empty() {
        AggregateValue::NoData
    } else {
        AggregateValue::Value(numbers.iter().sum())
    }
}

pub fn aggregate_for_account(
    frame: &DataFrame,
    account_column: &str,
    value_column: &str,
    account: &str,
    mode: AggregateMode,
) -> AggregateValue {
    match mode {
        AggregateMode::Latest => latest_for_account(frame, account_column, value_column, account),
        AggregateMode::Sum => sum_for_account(frame, account_column, value_column, account),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_levels() -> DataFrame {
        df!(
            "Account" => ["X", "X", "Y"],
            "SL %" => ["80.0", "82.5", "90.0"],
        )
        .unwrap()
    }

    #[test]
    fn latest_takes_last_matching_row() {
        let frame = service_levels();

        assert_eq!(
            latest_for_account(&frame, "Account", "SL %", "X"),
            AggregateValue::Value(82.5)
        );
        assert_eq!(
            latest_for_account(&frame, "Account", "SL %", "Y"),
            AggregateValue::Value(90.0)
        );
    }

    #[test]
    fn absent_account_or_column_is_no_data() {
        let frame = service_levels();

        assert_eq!(
            latest_for_account(&frame, "Account", "SL %", "Z"),
            AggregateValue::NoData
        );
        assert_eq!(
            latest_for_account(&frame, "Account", "Service Level", "X"),
            AggregateValue::NoData
        );
        assert_eq!(
            sum_for_account(&frame, "Region", "SL %", "X"),
            AggregateValue::NoData
        );
    }

    #[test]
    fn sum_adds_every_numeric_row_for_the_account() {
        let frame = df!(
            "Account" => ["X", "Y", "X", "X"],
            "Dropped Intervals" => [Some("2"), Some("7"), None, Some("3")],
        )
        .unwrap();

        assert_eq!(
            sum_for_account(&frame, "Account", "Dropped Intervals", "X"),
            AggregateValue::Value(5.0)
        );
        assert_eq!(
            latest_for_account(&frame, "Account", "Dropped Intervals", "X"),
            AggregateValue::Value(3.0)
        );
        assert_eq!(
            aggregate_for_account(&frame, "Account", "Dropped Intervals", "X", AggregateMode::Sum),
            AggregateValue::Value(5.0)
        );
    }

    #[test]
    fn null_last_value_is_no_data() {
        let frame = df!(
            "Account" => ["X", "X"],
            "Dropped Intervals" => [Some("4"), None],
        )
        .unwrap();

        assert_eq!(
            latest_for_account(&frame, "Account", "Dropped Intervals", "X"),
            AggregateValue::NoData
        );
    }

    #[test]
    fn display_matches_readout_labels() {
        assert_eq!(AggregateValue::Value(82.5).to_string(), "82.50");
        assert_eq!(AggregateValue::NoData.to_string(), "No Data Available");
    }
}
