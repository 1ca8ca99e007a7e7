// UI module for the night-lights explorer
// Frame chrome (navbar, status, shortcuts) plus per-page renderers

pub mod screens;
pub mod widgets;

use crate::app::App;
use crate::domain::Page;
use crate::ui::widgets::status::loading_line;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Navbar
            Constraint::Min(8),    // Page
            Constraint::Length(3), // Status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_navbar(app, f, layout[0]);

    match app.page {
        Page::Home => screens::home::render_home(app, f, layout[1]),
        Page::Login => screens::login::render_login(app, f, layout[1]),
        Page::Dashboard => screens::dashboard::render_dashboard(app, f, layout[1]),
        Page::Analysis => screens::analysis::render_analysis(app, f, layout[1]),
        Page::Compare => screens::compare::render_compare(app, f, layout[1]),
        Page::About => screens::about::render_about(f, layout[1]),
    }

    render_status_section(app, f, layout[2]);
    render_shortcuts(app, f, layout[3]);

    if app.show_help {
        screens::help::render_help_popup(f, f.area());
    }
}

fn render_navbar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(34)])
        .split(area);

    let titles = Page::NAV
        .iter()
        .map(|page| {
            let label = if page.is_protected() && !app.auth.is_authenticated() {
                format!("{} *", page.label())
            } else {
                page.label().to_string()
            };
            TextLine::from(label)
        })
        .collect::<Vec<_>>();

    let mut tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" Quatsch ")
                .title_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));
    if let Some(index) = app.page.nav_index() {
        tabs = tabs.select(index);
    }
    f.render_widget(tabs, chunks[0]);

    let account = if !app.auth.is_checked() {
        Span::styled("checking session...", Style::default().fg(Color::DarkGray))
    } else if let Some(email) = app.auth.email() {
        Span::styled(email.to_string(), Style::default().fg(Color::Green))
    } else {
        Span::styled("not signed in", Style::default().fg(Color::DarkGray))
    };
    let account = Paragraph::new(TextLine::from(account))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );
    f.render_widget(account, chunks[1]);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let status_text = if !app.status_message.is_empty() {
        let style = if app.status_message.starts_with("Error") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        Text::from(Span::styled(app.status_message.as_str(), style))
    } else if app.is_busy() {
        Text::from(loading_line(&app.throbber, "Working..."))
    } else {
        Text::from(Span::styled(
            format!("Backend {}", app.config.api_base_url),
            Style::default().fg(Color::DarkGray),
        ))
    };

    let status_paragraph = Paragraph::new(status_text)
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

fn key_hint(key: &'static str, action: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(
            key,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(action, Style::default().fg(Color::Gray)),
    ]
}

fn render_shortcuts(app: &App, f: &mut Frame<'_>, area: Rect) {
    let mut spans: Vec<Span<'static>> = Vec::new();
    spans.extend(key_hint("Tab", ": Next page | "));
    if app.auth.is_authenticated() {
        spans.extend(key_hint("F10", ": Sign out | "));
    }
    spans.extend(key_hint("F1", ": Help | "));
    spans.extend(key_hint("q", ": Quit"));

    let shortcuts = Paragraph::new(TextLine::from(spans)).alignment(Alignment::Center);
    f.render_widget(shortcuts, area);
}
