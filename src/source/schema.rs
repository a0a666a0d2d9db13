use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
pub struct ColumnBinding {
    pub field: &'static str,
    pub aliases: &'static [&'static str],
}

impl ColumnBinding {
    const fn new(field: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { field, aliases }
    }

    fn resolve<'a>(&self, header: &[&'a str]) -> Option<&'a str> {
        self.aliases
            .iter()
            .find_map(|alias| header.iter().copied().find(|name| name == alias))
    }
}

pub const LOGIN_ID: &str = "login_id";
pub const AGENT_NAME: &str = "agent_name";
pub const ACCOUNT: &str = "account";
pub const STATUS: &str = "status";
pub const DURATION_MINUTES: &str = "duration_minutes";
pub const SERVICE_LEVEL_PERCENT: &str = "service_level_percent";
pub const DROPPED_INTERVALS: &str = "dropped_intervals";

#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub name: &'static str,
    pub required: &'static [ColumnBinding],
    pub optional: &'static [ColumnBinding],
}

pub const AGENT_STATUS_SCHEMA: TableSchema = TableSchema {
    name: "agent_status",
    required: &[
        ColumnBinding::new(LOGIN_ID, &["Login ID"]),
        ColumnBinding::new(STATUS, &["Status"]),
        ColumnBinding::new(DURATION_MINUTES, &["Duration (min)"]),
    ],
    optional: &[
        ColumnBinding::new(ACCOUNT, &["Account"]),
        ColumnBinding::new(AGENT_NAME, &["Agent Name"]),
    ],
};

pub const SERVICE_LEVEL_SCHEMA: TableSchema = TableSchema {
    name: "service_level",
    required: &[
        ColumnBinding::new(ACCOUNT, &["Account"]),
        ColumnBinding::new(SERVICE_LEVEL_PERCENT, &["SL %", "Service Level"]),
    ],
    optional: &[],
};

pub const DROPPED_INTERVALS_SCHEMA: TableSchema = TableSchema {
    name: "dropped_intervals",
    required: &[
        ColumnBinding::new(ACCOUNT, &["Account"]),
        ColumnBinding::new(DROPPED_INTERVALS, &["Dropped Intervals"]),
    ],
    optional: &[],
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedColumns {
    bound: HashMap<&'static str, String>,
}

impl ResolvedColumns {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.bound.get(field).map(String::as_str)
    }
}

impl TableSchema {
    pub fn resolve(&self, header: &[&str]) -> Result<ResolvedColumns, Vec<String>> {
        let mut bound = HashMap::new();
        let mut missing = Vec::new();

        for binding in self.required {
            match binding.resolve(header) {
                Some(column) => {
                    bound.insert(binding.field, column.to_string());
                }
                None => missing.push(binding.field.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(missing);
        }

        for binding in self.optional {
            if let Some(column) = binding.resolve(header) {
                bound.insert(binding.field, column.to_string());
            }
        }

        Ok(ResolvedColumns { bound })
    }
}
