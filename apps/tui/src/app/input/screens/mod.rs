use crate::app::login::LoginStep;
use crate::app::state::App;
use crate::domain::Page;
use crossterm::event::KeyCode;

mod about;
mod analysis;
mod compare;
mod dashboard;
mod help;
mod home;
mod login;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    // An open text field on a data page takes every key
    if editing_text(app) {
        route_to_page(app, key);
        return;
    }

    if handle_global_keys(app, key) {
        return;
    }

    route_to_page(app, key);
}

fn editing_text(app: &App) -> bool {
    match app.page {
        Page::Dashboard => app.dashboard.editing,
        Page::Analysis => app.analysis.editing,
        Page::Compare => app.compare.editing,
        Page::Home | Page::Login | Page::About => false,
    }
}

/// Login form fields swallow plain characters, so `q` only quits elsewhere.
fn login_field_active(app: &App) -> bool {
    app.page == Page::Login
        && matches!(
            app.login.step(),
            LoginStep::EnteringEmail | LoginStep::EnteringOtp
        )
}

fn handle_global_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Tab => app.cycle_page(true),
        KeyCode::BackTab => app.cycle_page(false),
        KeyCode::F(10) => app.logout(),
        KeyCode::Char('q') if !login_field_active(app) => app.running = false,
        _ => return false,
    }
    true
}

fn route_to_page(app: &mut App, key: KeyCode) {
    match app.page {
        Page::Home => home::handle_home_input(app, key),
        Page::Login => login::handle_login_input(app, key),
        Page::Dashboard => dashboard::handle_dashboard_input(app, key),
        Page::Analysis => analysis::handle_analysis_input(app, key),
        Page::Compare => compare::handle_compare_input(app, key),
        Page::About => about::handle_about_input(app, key),
    }
}
