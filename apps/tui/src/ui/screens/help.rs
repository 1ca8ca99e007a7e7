use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(80, 80, area);
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(TextLine::from(Span::styled(
        "Press F1 or Esc to close",
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };

    f.render_widget(hint, hint_area);
}

fn heading(text: &'static str) -> TextLine<'static> {
    TextLine::from(Span::styled(
        text,
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn binding(key: &'static str, action: &'static str) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(
            format!("  {key:<10}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(action),
    ])
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let mut lines = vec![
        TextLine::from(Span::styled(
            "Quatsch night-lights explorer",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        TextLine::from("Browse VIIRS night-time lights, growth analysis and year comparisons."),
        TextLine::from(""),
        heading("Everywhere:"),
        binding("Tab/S-Tab", "Next / previous page"),
        binding("F1", "Toggle this help"),
        binding("F10", "Sign out"),
        binding("q", "Quit (outside text fields)"),
        TextLine::from(""),
        heading("Dashboard:"),
        binding("/ or s", "Search a region (Tab completes, Enter resolves)"),
        binding("Left/Right", "Previous / next year"),
        binding("+ / -", "Zoom in / out"),
        binding("r", "Reset map to world view"),
        binding("c", "Clear selected region"),
        binding("[ / ]", "Finer / coarser sampling"),
        binding("i", "Reload insights"),
        binding("Up/Down", "Scroll insights"),
        TextLine::from(""),
        heading("Analysis and Compare:"),
        binding("/ or e", "Edit region"),
        binding("Up/Down", "Switch year field"),
        binding("Left/Right", "Change selected year"),
        binding("Enter", "Run"),
        binding("[ / ]", "Analysis: switch tab. Compare: move blend"),
        binding("PgUp/PgDn", "Scroll tables"),
        TextLine::from(""),
        heading("Login:"),
        binding("Enter", "Send code / verify code"),
        binding("r", "Resend code"),
        binding("Esc", "Back to email"),
        TextLine::from(""),
        heading("CLI Options:"),
    ];

    let help_text = crate::cli::CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine::from(line.to_string()));
    }

    lines
}
