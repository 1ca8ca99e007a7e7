use crate::app::input::helpers::{edit_text, TextEdit};
use crate::app::state::App;
use crossterm::event::KeyCode;

const SUGGESTION_LIMIT: usize = 5;

pub fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    if app.dashboard.editing {
        handle_search_input(app, key);
        return;
    }

    match key {
        KeyCode::Char('/' | 's') => {
            app.dashboard.editing = true;
            app.dashboard.notice = None;
        }
        KeyCode::Left => app.step_dashboard_year(-1),
        KeyCode::Right => app.step_dashboard_year(1),
        KeyCode::Home => app.set_dashboard_year(app.years.first()),
        KeyCode::End => app.set_dashboard_year(app.years.last()),
        KeyCode::Char('+' | '=') => app.dashboard.map.zoom_in(),
        KeyCode::Char('-') => app.dashboard.map.zoom_out(),
        KeyCode::Char('r') => app.dashboard.map.reset(),
        KeyCode::Char('c') => app.clear_search(),
        KeyCode::Char('[') => app.change_sample_rate(true),
        KeyCode::Char(']') => app.change_sample_rate(false),
        KeyCode::Char('i') => app.reload_insights(),
        KeyCode::Up => {
            app.dashboard.insight_offset = app.dashboard.insight_offset.saturating_sub(1);
        }
        KeyCode::Down => {
            let count = app
                .dashboard
                .insights
                .state()
                .value()
                .map_or(0, Vec::len);
            if app.dashboard.insight_offset + 1 < count {
                app.dashboard.insight_offset += 1;
            }
        }
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyCode) {
    if key == KeyCode::Tab {
        let completion = app
            .gazetteer
            .suggest(&app.dashboard.query, SUGGESTION_LIMIT)
            .first()
            .map(|entry| entry.key.to_string());
        if let Some(completion) = completion {
            app.dashboard.query = completion;
        }
        return;
    }

    match edit_text(&mut app.dashboard.query, key) {
        TextEdit::Submit => app.submit_search(),
        TextEdit::Cancel => app.dashboard.editing = false,
        TextEdit::Changed | TextEdit::Ignored => {}
    }
}
