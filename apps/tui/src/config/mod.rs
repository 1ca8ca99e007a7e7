// Config module for quatsch_tui
// Environment-driven settings

#[allow(clippy::module_inception)]
mod config;

pub use config::{init_app_config, parse_config, AppConfig};
