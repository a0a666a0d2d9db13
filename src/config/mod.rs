mod defaults;
mod io;
mod schema;
mod validate;

pub use io::{load_config, load_config_or_default};
pub use schema::{Config, Filters, RuntimeConfig};
pub use validate::validate_thresholds;
