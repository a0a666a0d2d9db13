use std::path::Path;

use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::app_context::AppContext;
use crate::config::{RuntimeConfig, load_config};
use crate::dashboard::DashboardEvent;

#[derive(Debug, PartialEq)]
enum ReloadOutcome {
    Unchanged,
    Applied(RuntimeConfig),
}

// Editors emit several events per save; only a change in the runtime subset reaches the scheduler.
fn reload_runtime_config(
    app_context: &AppContext,
    config_path: &str,
    current: &RuntimeConfig,
) -> Result<ReloadOutcome, String> {
    let reloaded = load_config(config_path)
        .map(|config| RuntimeConfig::from_config(&config))
        .map_err(|error| error.to_string())?;

    if reloaded == *current {
        return Ok(ReloadOutcome::Unchanged);
    }

    app_context
        .dashboard
        .trigger(DashboardEvent::SetThresholds(reloaded.thresholds));
    Ok(ReloadOutcome::Applied(reloaded))
}

fn is_content_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Any
    )
}

fn watch_config_file(
    path: &Path,
    tx: mpsc::UnboundedSender<notify::Result<Event>>,
) -> notify::Result<RecommendedWatcher> {
    let mut watcher = RecommendedWatcher::new(
        move |result| {
            let _ = tx.send(result);
        },
        NotifyConfig::default(),
    )?;
    watcher.watch(path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

pub(super) fn start_config_hot_reload_job(app_context: AppContext) {
    let config_path = app_context.config_path.clone();
    if !Path::new(&config_path).exists() {
        log::info!("config_hot_reload_disabled path={} reason=file_absent", config_path);
        return;
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let watcher = match watch_config_file(Path::new(&config_path), tx) {
        Ok(watcher) => watcher,
        Err(error) => {
            log::warn!(
                "config_hot_reload_disabled path={} reason=watch_failed error={}",
                config_path,
                error
            );
            return;
        }
    };

    tokio::spawn(async move {
        let _watcher = watcher;
        let mut current = RuntimeConfig::from_config(&app_context.config);

        while let Some(event_result) = rx.recv().await {
            match event_result {
                Ok(event) if is_content_change(&event.kind) => {}
                Ok(_) => continue,
                Err(error) => {
                    log::warn!("config_hot_reload_event_error error={}", error);
                    continue;
                }
            }

            match reload_runtime_config(&app_context, &config_path, &current) {
                Ok(ReloadOutcome::Applied(reloaded)) => {
                    log::info!(
                        "config_hot_reload_applied previous_yellow={} previous_red={} yellow={} red={}",
                        current.thresholds.yellow,
                        current.thresholds.red,
                        reloaded.thresholds.yellow,
                        reloaded.thresholds.red
                    );
                    current = reloaded;
                }
                Ok(ReloadOutcome::Unchanged) => {
                    log::debug!("config_hot_reload_skipped reason=runtime_unchanged");
                }
                Err(error) => {
                    log::warn!(
                        "config_hot_reload_rejected action=keep_previous error={}",
                        error
                    );
                }
            }
        }
    });
}
