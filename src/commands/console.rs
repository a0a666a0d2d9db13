use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app_context::AppContext;

use super::handler::answer;
use super::helpers::{PresentedKey, presented_key, render_dashboard};

pub async fn run_console(app_context: AppContext) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let Some(reply) = answer(&line, &app_context) {
                    println!("{}", reply);
                }
            }
            Ok(None) => {
                log::info!("console_closed reason=stdin_eof");
                return;
            }
            Err(error) => {
                log::warn!("console_closed reason=stdin_error error={}", error);
                return;
            }
        }
    }
}

pub fn start_presenter(app_context: AppContext) {
    tokio::spawn(async move {
        let mut snapshots = app_context.dashboard.subscribe();
        let mut last_printed: Option<PresentedKey> = None;

        while snapshots.changed().await.is_ok() {
            let rendered = {
                let snapshot = snapshots.borrow_and_update();
                let key = presented_key(&snapshot);
                if last_printed.as_ref() == Some(&key) {
                    continue;
                }
                last_printed = Some(key);
                render_dashboard(&snapshot)
            };
            println!("{}\n", rendered);
        }

        log::info!("presenter_stopped reason=snapshot_channel_closed");
    });
}
