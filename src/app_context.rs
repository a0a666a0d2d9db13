use crate::{config::Config, jobs::DashboardHandle};

#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub config_path: String,
    pub dashboard: DashboardHandle,
}

impl AppContext {
    pub fn new(config: Config, config_path: impl Into<String>, dashboard: DashboardHandle) -> Self {
        Self {
            config,
            config_path: config_path.into(),
            dashboard,
        }
    }
}
