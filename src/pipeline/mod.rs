mod aggregate;
mod filter;
mod threshold;

pub use aggregate::{AggregateMode, AggregateValue, aggregate_for_account};
pub use filter::{FilterCriteria, SearchField, StatusFilter, apply_filters};
pub use threshold::{Severity, ThresholdConfig};
