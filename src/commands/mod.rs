mod command_def;
mod console;
mod handler;
mod helpers;
mod parser;
mod router;

pub use console::{run_console, start_presenter};

#[cfg(test)]
mod tests;
