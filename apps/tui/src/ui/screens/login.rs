use crate::app::login::{LoginMessage, LoginStep};
use crate::app::App;
use crate::ui::widgets::popup::centered_rect;
use crate::ui::widgets::status::loading_line;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

fn cursor(animation: f64) -> &'static str {
    if animation.sin() > 0.0 {
        "_"
    } else {
        " "
    }
}

fn field_line<'a>(label: &'a str, value: String, active: bool, animation: f64) -> TextLine<'a> {
    let value_style = if active {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut spans = vec![
        Span::styled(format!("{label:<7}"), Style::default().fg(Color::Cyan)),
        Span::styled(value, value_style),
    ];
    if active {
        spans.push(Span::styled(cursor(animation * 8.0), value_style));
    }
    TextLine::from(spans)
}

/// OTP digits padded with placeholders up to six.
fn otp_display(otp: &str) -> String {
    let mut shown: String = otp.chars().flat_map(|c| [c, ' ']).collect();
    for _ in otp.chars().count()..6 {
        shown.push_str("· ");
    }
    shown.trim_end().to_string()
}

pub fn render_login(app: &App, f: &mut Frame<'_>, area: Rect) {
    let form = &app.login;
    let step = form.step();
    let mut lines = vec![
        TextLine::from(Span::styled(
            "Sign in with a one-time code",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        field_line(
            "Email",
            form.email.clone(),
            step == LoginStep::EnteringEmail,
            app.animation_counter,
        ),
    ];

    if matches!(
        step,
        LoginStep::EnteringOtp | LoginStep::ResendingOtp | LoginStep::Verifying
    ) {
        lines.push(field_line(
            "Code",
            otp_display(&form.otp),
            step == LoginStep::EnteringOtp,
            app.animation_counter,
        ));
    }
    lines.push(TextLine::from(""));

    match step {
        LoginStep::SendingOtp => lines.push(loading_line(&app.throbber, "Sending code...")),
        LoginStep::ResendingOtp => lines.push(loading_line(&app.throbber, "Sending a new code...")),
        LoginStep::Verifying => lines.push(loading_line(&app.throbber, "Verifying...")),
        _ => {}
    }

    match &form.message {
        Some(LoginMessage::Success(text)) => lines.push(TextLine::from(Span::styled(
            text.as_str(),
            Style::default().fg(Color::Green),
        ))),
        Some(LoginMessage::Error(text)) => lines.push(TextLine::from(Span::styled(
            text.as_str(),
            Style::default().fg(Color::Red),
        ))),
        None => {}
    }

    lines.push(TextLine::from(""));
    let hint = match step {
        LoginStep::EnteringEmail => "Enter: send code | Esc: home",
        LoginStep::EnteringOtp => "Enter: verify | r: resend code | Esc: change email",
        LoginStep::SignedIn => "Enter: continue",
        LoginStep::SendingOtp | LoginStep::ResendingOtp | LoginStep::Verifying => "",
    };
    lines.push(TextLine::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    )));

    if let Some(page) = app.pending_page {
        lines.push(TextLine::from(Span::styled(
            format!("You will continue to {} after signing in.", page.label()),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let form_area = centered_rect(60, 70, area);
    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(" Login ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, form_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_placeholder_always_shows_six_slots() {
        assert_eq!(otp_display(""), "· · · · · ·");
        assert_eq!(otp_display("12"), "1 2 · · · ·");
        assert_eq!(otp_display("123456"), "1 2 3 4 5 6");
    }
}
