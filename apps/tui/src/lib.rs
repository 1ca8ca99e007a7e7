// Export our modules for use in binaries and tests
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod event;
pub mod explorer;
pub mod logging;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use domain::{LatLon, Page};
