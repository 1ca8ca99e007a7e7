use crate::api::models::{SectorBreakdown, YearSnapshot, YoyGrowth};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
};
use ratatui::Frame;

fn empty_panel(f: &mut Frame<'_>, area: Rect, title: &str, message: &str) {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new(message)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

/// Axis bounds padded by a tenth of the span so lines do not sit on the frame.
pub fn padded_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let pad = ((max - min) * 0.1).max(1.0);
    [min - pad, max + pad]
}

/// Human scale for the GDP proxy, which runs into the millions.
pub fn compact_number(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if magnitude >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if magnitude >= 1e3 {
        format!("{:.1}K", value / 1e3)
    } else {
        format!("{value:.1}")
    }
}

pub fn render_timeline_chart(f: &mut Frame<'_>, area: Rect, timeline: &[YearSnapshot]) {
    const TITLE: &str = " Sum of lights (GDP proxy) ";
    if timeline.is_empty() {
        empty_panel(f, area, TITLE, "No timeline data");
        return;
    }

    let points: Vec<(f64, f64)> = timeline
        .iter()
        .map(|snapshot| (f64::from(snapshot.year), snapshot.gdp_proxy_sol))
        .collect();

    let x_bounds = padded_bounds(points.iter().map(|(x, _)| *x));
    let y_bounds = padded_bounds(points.iter().map(|(_, y)| *y));

    let first_year = timeline.first().map_or(0, |s| s.year);
    let last_year = timeline.last().map_or(0, |s| s.year);

    let datasets = vec![Dataset::default()
        .name("SOL")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Yellow))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(TITLE)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(
            Axis::default()
                .title("Year")
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(vec![
                    Span::raw(first_year.to_string()),
                    Span::raw(last_year.to_string()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(vec![
                    Span::raw(compact_number(y_bounds[0])),
                    Span::raw(compact_number(y_bounds[1])),
                ]),
        );

    f.render_widget(chart, area);
}

/// Year-over-year growth; negative years are drawn red at their magnitude.
pub fn render_yoy_barchart(f: &mut Frame<'_>, area: Rect, yoy: &[YoyGrowth]) {
    const TITLE: &str = " Year-over-year growth % ";
    if yoy.is_empty() {
        empty_panel(f, area, TITLE, "Not enough years for growth rates");
        return;
    }

    let bars: Vec<Bar<'_>> = yoy
        .iter()
        .map(|entry| {
            let color = if entry.growth_rate < 0.0 {
                Color::Red
            } else {
                Color::Green
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let height = entry.growth_rate.abs().round() as u64;
            Bar::default()
                .value(height)
                .text_value(format!("{:.1}", entry.growth_rate))
                .label(TextLine::from(entry.year.to_string()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(TITLE)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_gap(1)
        .bar_width(6);

    f.render_widget(chart, area);
}

/// Rural / urban / industrial light shares for one year.
pub fn render_sector_barchart(f: &mut Frame<'_>, area: Rect, title: &str, sectors: &SectorBreakdown) {
    let values = [
        ("Rural", sectors.rural, Color::Green),
        ("Urban", sectors.urban, Color::Yellow),
        ("Industry", sectors.industrial, Color::Magenta),
    ];

    let bars: Vec<Bar<'_>> = values
        .iter()
        .map(|(label, value, color)| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let height = value.max(0.0).round() as u64;
            Bar::default()
                .value(height)
                .text_value(compact_number(*value))
                .label(TextLine::from(*label))
                .style(Style::default().fg(*color))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_gap(1)
        .bar_width(8);

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_pad_the_data_range() {
        let [lo, hi] = padded_bounds([100.0, 200.0].into_iter());
        assert!((lo - 90.0).abs() < 1e-9);
        assert!((hi - 210.0).abs() < 1e-9);
        assert_eq!(padded_bounds(std::iter::empty()), [0.0, 1.0]);
    }

    #[test]
    fn large_values_are_compacted() {
        assert_eq!(compact_number(2_500_000.0), "2.5M");
        assert_eq!(compact_number(1_200.0), "1.2K");
        assert_eq!(compact_number(42.0), "42.0");
    }
}
