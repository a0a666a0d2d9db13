use crate::app_context::AppContext;

mod config_reload;
mod refresh;

pub use refresh::{DashboardHandle, RefreshInputs, dashboard_channel, initial_state};

pub fn start_background_jobs(app_context: AppContext, refresh_inputs: RefreshInputs) {
    refresh::start_refresh_job(app_context.clone(), refresh_inputs);
    config_reload::start_config_hot_reload_job(app_context);
}
