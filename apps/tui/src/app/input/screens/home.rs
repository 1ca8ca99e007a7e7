use crate::app::state::App;
use crate::domain::Page;
use crossterm::event::KeyCode;

pub fn handle_home_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter => app.navigate(Page::Dashboard),
        KeyCode::Char('l') if !app.auth.is_authenticated() => app.navigate(Page::Login),
        _ => {}
    }
}
