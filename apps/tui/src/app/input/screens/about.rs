use crate::app::state::App;
use crate::domain::Page;
use crossterm::event::KeyCode;

pub fn handle_about_input(app: &mut App, key: KeyCode) {
    if key == KeyCode::Esc {
        app.navigate(Page::Home);
    }
}
