use crate::explorer::FetchState;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, ThrobberState, BRAILLE_SIX};

pub fn error_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

/// Spinner followed by `label`, advanced by the app tick.
pub fn loading_line<'a>(throbber: &ThrobberState, label: impl Into<String>) -> TextLine<'a> {
    let spinner = Throbber::default()
        .throbber_set(BRAILLE_SIX)
        .throbber_style(Style::default().fg(Color::Cyan))
        .to_symbol_span(throbber);
    TextLine::from(vec![
        spinner,
        Span::raw(" "),
        Span::styled(label.into(), Style::default().fg(Color::Gray)),
    ])
}

/// One-line summary of a fetch: spinner while loading, red banner on failure.
/// `None` once data is there.
pub fn fetch_line<'a, T>(
    state: &FetchState<T>,
    throbber: &ThrobberState,
    what: &str,
) -> Option<TextLine<'a>> {
    match state {
        FetchState::Idle => Some(TextLine::from(Span::styled(
            format!("No {what} requested yet"),
            Style::default().fg(Color::DarkGray),
        ))),
        FetchState::Loading => Some(loading_line(throbber, format!("Loading {what}..."))),
        FetchState::Failure(reason) => Some(TextLine::from(Span::styled(
            format!("Error: {reason}"),
            error_style(),
        ))),
        FetchState::Success(_) => None,
    }
}

/// Bordered panel holding just the fetch summary, for panels with nothing else to show.
pub fn render_fetch_placeholder<T>(
    f: &mut Frame<'_>,
    area: Rect,
    state: &FetchState<T>,
    throbber: &ThrobberState,
    what: &str,
    title: &str,
) {
    let line = fetch_line(state, throbber, what).unwrap_or_default();
    let border = if state.error().is_some() {
        Color::Red
    } else {
        Color::Cyan
    };
    let paragraph = Paragraph::new(line)
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
