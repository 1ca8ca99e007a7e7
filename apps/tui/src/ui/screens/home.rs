use crate::app::App;
use crate::ui::widgets::globe::render_globe;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_home(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_globe(
        f,
        chunks[0],
        app.animation_counter,
        app.gazetteer.entries(),
    );

    let mut lines = vec![
        TextLine::from(Span::styled(
            "Earth at night",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from("Explore how regions light up year by year, measure growth"),
        TextLine::from("and spot new development from space."),
        TextLine::from(""),
    ];

    let action = if app.auth.is_authenticated() {
        "Press Enter to open the dashboard"
    } else {
        "Press l to sign in, or Enter to head to the dashboard"
    };
    lines.push(TextLine::from(Span::styled(
        action,
        Style::default().fg(Color::Green),
    )));

    if !app.regions.is_empty() {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(Span::styled(
            "Regions with analysis data:",
            Style::default().fg(Color::Gray),
        )));
        let names: Vec<&str> = app.regions.iter().map(|r| r.name.as_str()).collect();
        lines.push(TextLine::from(names.join(", ")));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .title(" Welcome ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, chunks[1]);
}
