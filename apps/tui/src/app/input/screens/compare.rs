use crate::app::compare::CompareField;
use crate::app::input::helpers::{edit_text, TextEdit};
use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_compare_input(app: &mut App, key: KeyCode) {
    if app.compare.editing {
        match edit_text(&mut app.compare.region, key) {
            TextEdit::Submit => {
                app.compare.editing = false;
                app.run_compare();
            }
            TextEdit::Cancel => app.compare.editing = false,
            TextEdit::Changed | TextEdit::Ignored => {}
        }
        return;
    }

    match key {
        KeyCode::Char('/' | 'e') => app.compare.editing = true,
        KeyCode::Up | KeyCode::Down => {
            app.compare.field = match app.compare.field {
                CompareField::Year1 => CompareField::Year2,
                CompareField::Year2 => CompareField::Year1,
            };
        }
        KeyCode::Left | KeyCode::Right => {
            let steps = if key == KeyCode::Left { -1 } else { 1 };
            let year = app.years.step(*app.compare.selected_year_mut(), steps);
            *app.compare.selected_year_mut() = year;
        }
        KeyCode::Enter => app.run_compare(),
        KeyCode::Char('[') => app.compare.nudge_blend(false),
        KeyCode::Char(']') => app.compare.nudge_blend(true),
        _ => {}
    }
}
