use crate::app_context::AppContext;

use super::parser::parse_command;
use super::router::route_command;

pub fn answer(line: &str, app_context: &AppContext) -> Option<String> {
    match parse_command(line, &app_context.config.filters) {
        Ok(Some(command)) => {
            log::debug!("console_command_received command={:?}", command);
            Some(route_command(command, app_context))
        }
        Ok(None) => None,
        Err(error) => {
            log::debug!("console_command_rejected line={:?} error={}", line.trim(), error);
            Some(format!("error: {}", error))
        }
    }
}
