mod app_context;
mod commands;
mod config;
mod dashboard;
mod jobs;
mod pipeline;
mod source;

use tracing_subscriber::EnvFilter;

use crate::app_context::AppContext;
use crate::commands::{run_console, start_presenter};
use crate::config::{Config, load_config_or_default};
use crate::jobs::{dashboard_channel, initial_state, start_background_jobs};

fn init_json_logging() {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

const CONFIG_PATH: &str = "dashboard.toml";

// Main
#[tokio::main]
async fn main() {
    init_json_logging();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| CONFIG_PATH.to_string());

    let config: Config = match load_config_or_default(&config_path) {
        Ok(config) => config,
        Err(error) => {
            log::error!("Configuration error: {}", error);
            return;
        }
    };

    log::info!(
        "Agent status dashboard is starting... config={} sources_dir={} refresh_interval_secs={}",
        config_path,
        config.sources.dir,
        config.refresh_interval_secs
    );

    let (dashboard, refresh_inputs) = dashboard_channel(initial_state(&config));
    let app_context = AppContext::new(config, config_path, dashboard);

    start_background_jobs(app_context.clone(), refresh_inputs);
    start_presenter(app_context.clone());

    tokio::select! {
        _ = run_console(app_context) => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(error) = result {
                log::warn!("shutdown_signal_error error={}", error);
            }
            log::info!("shutdown reason=ctrl_c");
        }
    }
}
