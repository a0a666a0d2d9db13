mod model;
mod reader;
pub mod schema;

pub use model::{AgentStatus, AgentStatusRow, agent_records, parse_number};
pub use reader::{SourceError, read_snapshot, text_column};
pub use schema::{
    AGENT_STATUS_SCHEMA, DROPPED_INTERVALS_SCHEMA, ResolvedColumns, SERVICE_LEVEL_SCHEMA,
    TableSchema,
};

#[cfg(test)]
mod tests;
