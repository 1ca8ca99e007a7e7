use crate::app::App;
use crate::ui::widgets::map::{render_map, MapLayer, INTENSITY_RAMP};
use crate::ui::widgets::status::{fetch_line, render_fetch_placeholder};
use crate::ui::widgets::tables::clamp_offset;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

const SUGGESTION_LIMIT: usize = 5;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search
            Constraint::Min(6),    // Map
            Constraint::Length(3), // Year slider
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(5)])
        .split(columns[1]);

    render_search_bar(app, f, left[0]);
    render_region_map(app, f, left[1]);
    render_year_slider(app, f, left[2]);
    render_statistics(app, f, right[0]);
    render_insights(app, f, right[1]);
}

fn render_search_bar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let dashboard = &app.dashboard;
    let mut spans = vec![Span::styled(
        "Region: ",
        Style::default().fg(Color::Cyan),
    )];

    if dashboard.editing {
        spans.push(Span::styled(
            format!("{}_", dashboard.query),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
        let suggestions: Vec<&str> = app
            .gazetteer
            .suggest(&dashboard.query, SUGGESTION_LIMIT)
            .iter()
            .map(|entry| entry.key)
            .collect();
        if !suggestions.is_empty() && !dashboard.query.trim().is_empty() {
            spans.push(Span::styled(
                format!("  Tab: {}", suggestions.join(", ")),
                Style::default().fg(Color::DarkGray),
            ));
        }
    } else if let Some(notice) = &dashboard.notice {
        spans.push(Span::styled(notice.as_str(), Style::default().fg(Color::Red)));
    } else if let Some(region) = &dashboard.region {
        spans.push(Span::styled(
            region.key,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::styled(
            "whole world (press / to search)",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let border = if dashboard.editing {
        Color::Yellow
    } else {
        Color::Blue
    };
    let paragraph = Paragraph::new(TextLine::from(spans)).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(paragraph, area);
}

fn render_region_map(app: &App, f: &mut Frame<'_>, area: Rect) {
    let dashboard = &app.dashboard;
    let viewport = dashboard.map.displayed();
    let title = format!(
        " Night lights {} | zoom {:.1} | sample 1/{} ",
        dashboard.year, viewport.zoom, dashboard.sample_rate
    );
    let layer = MapLayer {
        viewport,
        data: dashboard.nightlights.state().value(),
        marker: dashboard.region.as_ref(),
        title,
    };
    render_map(f, area, &layer);
}

fn render_year_slider(app: &App, f: &mut Frame<'_>, area: Rect) {
    let year = app.dashboard.year;
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(format!(" Year {}..{} ", app.years.first(), app.years.last()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .gauge_style(Style::default().fg(Color::Yellow).bg(Color::Black))
        .ratio(app.years.ratio(year))
        .label(format!("< {year} >"));
    f.render_widget(gauge, area);
}

fn stat_line<'a>(label: &'a str, value: String) -> TextLine<'a> {
    TextLine::from(vec![
        Span::styled(format!("{label:<14}"), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::Yellow)),
    ])
}

fn render_statistics(app: &App, f: &mut Frame<'_>, area: Rect) {
    let state = app.dashboard.nightlights.state();
    let Some(data) = state.value() else {
        render_fetch_placeholder(f, area, state, &app.throbber, "night-lights data", "Statistics");
        return;
    };

    let mut lines = vec![stat_line(
        "Data points",
        data.data_points.len().to_string(),
    )];
    if let Some(stats) = data.metadata.as_ref().and_then(|m| m.statistics.as_ref()) {
        lines.push(stat_line("Mean (lit)", format!("{:.2}", stats.mean_lit)));
        lines.push(stat_line("Max", format!("{:.2}", stats.max)));
        lines.push(stat_line("Std dev", format!("{:.2}", stats.std_dev)));
        lines.push(stat_line(
            "Lit pixels",
            format!("{} / {}", stats.lit_pixels, stats.total_pixels),
        ));
    } else {
        lines.push(stat_line("Brightest", format!("{:.2}", data.max_value())));
    }

    let legend: Vec<Span<'_>> = ["faint", "dim", "bright", "intense"]
        .iter()
        .zip(INTENSITY_RAMP)
        .flat_map(|(label, color)| {
            [
                Span::styled("■ ", Style::default().fg(color)),
                Span::styled(format!("{label} "), Style::default().fg(Color::Gray)),
            ]
        })
        .collect();
    lines.push(TextLine::from(""));
    lines.push(TextLine::from(legend));

    let paragraph = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .title(" Statistics ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}

fn render_insights(app: &App, f: &mut Frame<'_>, area: Rect) {
    let dashboard = &app.dashboard;
    let block = insights_block(" Insights ".to_string());

    if dashboard.region.is_none() {
        let paragraph = Paragraph::new("Search for a region to see insights.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    }

    let state = dashboard.insights.state();
    let Some(insights) = state.value() else {
        let line = fetch_line(state, &app.throbber, "insights").unwrap_or_default();
        f.render_widget(Paragraph::new(line).block(block), area);
        return;
    };

    let visible = usize::from(area.height.saturating_sub(2) / 3).max(1);
    let offset = clamp_offset(insights.len(), visible, dashboard.insight_offset);
    let width = usize::from(area.width.saturating_sub(4)).max(10);

    let items: Vec<ListItem<'_>> = insights
        .iter()
        .skip(offset)
        .map(|insight| {
            let mut lines: Vec<TextLine<'_>> = wrap_words(&insight.text, width)
                .into_iter()
                .enumerate()
                .map(|(i, chunk)| {
                    let bullet = if i == 0 { "• " } else { "  " };
                    TextLine::from(format!("{bullet}{chunk}"))
                })
                .collect();
            if let Some(source) = &insight.source {
                let tag = insight
                    .url
                    .as_ref()
                    .map_or_else(|| source.clone(), |url| format!("{source} ({url})"));
                lines.push(TextLine::from(Span::styled(
                    format!("  [{tag}]"),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            ListItem::new(Text::from(lines))
        })
        .collect();

    let title = format!(" Insights {}/{} ", offset + 1, insights.len());
    f.render_widget(List::new(items).block(insights_block(title)), area);
}

fn insights_block(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
}

/// Greedy word wrap; List items do not wrap on their own.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::wrap_words;

    #[test]
    fn wrap_respects_width() {
        let lines = wrap_words("Tamil Nadu shows strong urban growth in 2021", 16);
        assert!(lines.iter().all(|line| line.len() <= 16));
        assert_eq!(lines.join(" "), "Tamil Nadu shows strong urban growth in 2021");
    }
}
