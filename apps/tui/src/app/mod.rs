// App module for quatsch_tui
// Handles application state, page commands and backend events

pub mod actions;
pub mod analysis;
pub mod compare;
pub mod dashboard;
pub mod events;
pub mod input;
pub mod login;
pub mod state;

pub use events::ApiEvent;
pub use input::handle_input;
pub use state::App;
