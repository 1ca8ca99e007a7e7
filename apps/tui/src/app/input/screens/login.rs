use crate::app::login::LoginStep;
use crate::app::state::App;
use crate::domain::Page;
use crossterm::event::KeyCode;

const OTP_LEN: usize = 6;

pub fn handle_login_input(app: &mut App, key: KeyCode) {
    match app.login.step() {
        LoginStep::EnteringEmail => handle_email_input(app, key),
        LoginStep::EnteringOtp => handle_otp_input(app, key),
        LoginStep::SignedIn => {
            if key == KeyCode::Enter {
                let target = app.pending_page.take().unwrap_or(Page::Dashboard);
                app.navigate(target);
            }
        }
        // Waiting on the backend
        LoginStep::SendingOtp | LoginStep::ResendingOtp | LoginStep::Verifying => {}
    }
}

fn handle_email_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(c) if !c.is_whitespace() => app.login.email.push(c),
        KeyCode::Backspace => {
            app.login.email.pop();
        }
        KeyCode::Enter => app.submit_login(),
        KeyCode::Esc => app.navigate(Page::Home),
        _ => {}
    }
}

fn handle_otp_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if app.login.otp.len() < OTP_LEN {
                app.login.otp.push(c);
            }
        }
        KeyCode::Char('r') => app.resend_otp(),
        KeyCode::Backspace => {
            app.login.otp.pop();
        }
        KeyCode::Enter => app.submit_login(),
        KeyCode::Esc => app.login_back(),
        _ => {}
    }
}
