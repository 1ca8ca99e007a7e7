use crate::app::analysis::{AnalysisField, AnalysisTab};
use crate::app::input::helpers::{edit_text, wrap_decrement, wrap_increment, TextEdit};
use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_analysis_input(app: &mut App, key: KeyCode) {
    if app.analysis.editing {
        match edit_text(&mut app.analysis.region, key) {
            TextEdit::Submit => {
                app.analysis.editing = false;
                app.run_analysis();
            }
            TextEdit::Cancel => app.analysis.editing = false,
            TextEdit::Changed | TextEdit::Ignored => {}
        }
        return;
    }

    match key {
        KeyCode::Char('/' | 'e') => app.analysis.editing = true,
        KeyCode::Up | KeyCode::Down => {
            app.analysis.field = match app.analysis.field {
                AnalysisField::StartYear => AnalysisField::EndYear,
                AnalysisField::EndYear => AnalysisField::StartYear,
            };
        }
        KeyCode::Left | KeyCode::Right => {
            let steps = if key == KeyCode::Left { -1 } else { 1 };
            let year = app.years.step(*app.analysis.selected_year_mut(), steps);
            *app.analysis.selected_year_mut() = year;
        }
        KeyCode::Enter => app.run_analysis(),
        KeyCode::Char('[') => {
            let index = wrap_decrement(app.analysis.tab.index(), AnalysisTab::ALL.len());
            app.analysis.tab = AnalysisTab::ALL[index];
            app.analysis.row_offset = 0;
        }
        KeyCode::Char(']') => {
            let index = wrap_increment(app.analysis.tab.index(), AnalysisTab::ALL.len());
            app.analysis.tab = AnalysisTab::ALL[index];
            app.analysis.row_offset = 0;
        }
        KeyCode::PageDown | KeyCode::Char('j') => app.analysis.row_offset += 1,
        KeyCode::PageUp | KeyCode::Char('k') => {
            app.analysis.row_offset = app.analysis.row_offset.saturating_sub(1);
        }
        _ => {}
    }
}
