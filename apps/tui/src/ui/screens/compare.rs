use crate::api::image_url;
use crate::api::models::{Comparison, YearSnapshot};
use crate::app::compare::CompareField;
use crate::app::App;
use crate::ui::widgets::charts::{compact_number, render_sector_barchart};
use crate::ui::widgets::status::{error_style, fetch_line, render_fetch_placeholder};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

pub fn render_compare(app: &App, f: &mut Frame<'_>, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(6)])
        .split(area);

    render_form(app, f, layout[0]);

    let state = app.compare.comparison.state();
    let Some(comparison) = state.value() else {
        render_fetch_placeholder(f, layout[1], state, &app.throbber, "comparison", "Comparison");
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(layout[1]);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(9), Constraint::Length(3), Constraint::Length(9)])
        .split(columns[0]);

    let blended = app.compare.blended().unwrap_or_default();
    render_snapshot_table(f, left[0], comparison, &blended);
    render_blend_slider(app, f, left[1], comparison);
    render_sector_barchart(
        f,
        left[2],
        &format!("Sectors at blend ({})", blended.year),
        &blended.sector_breakdown,
    );
    render_details(app, f, columns[1], comparison);
}

fn year_span(year: i32, selected: bool) -> Span<'static> {
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    Span::styled(year.to_string(), style)
}

fn render_form(app: &App, f: &mut Frame<'_>, area: Rect) {
    let compare = &app.compare;
    let label = Style::default().fg(Color::Cyan);
    let region_style = if compare.editing {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let region = if compare.editing {
        format!("{}_", compare.region)
    } else {
        compare.region.clone()
    };

    let form = TextLine::from(vec![
        Span::styled("Region ", label),
        Span::styled(region, region_style),
        Span::styled("   Year A ", label),
        year_span(
            compare.year1,
            !compare.editing && compare.field == CompareField::Year1,
        ),
        Span::styled("   Year B ", label),
        year_span(
            compare.year2,
            !compare.editing && compare.field == CompareField::Year2,
        ),
    ]);

    let status = match &compare.notice {
        Some(notice) => TextLine::from(Span::styled(format!("Error: {notice}"), error_style())),
        None => fetch_line(compare.comparison.state(), &app.throbber, "comparison")
            .unwrap_or_default(),
    };

    let paragraph = Paragraph::new(Text::from(vec![form, status])).block(
        Block::default()
            .title(" Compare years (Enter to run) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(paragraph, area);
}

fn change_cell(value: f64) -> Cell<'static> {
    let color = if value < 0.0 { Color::Red } else { Color::Green };
    Cell::from(format!("{value:+.1}%")).style(Style::default().fg(color))
}

fn render_snapshot_table(
    f: &mut Frame<'_>,
    area: Rect,
    comparison: &Comparison,
    blended: &YearSnapshot,
) {
    let (a, b, changes) = (&comparison.year1, &comparison.year2, &comparison.changes);
    let metric = |name: &'static str, pick: fn(&YearSnapshot) -> f64, change: f64| {
        Row::new(vec![
            Cell::from(name),
            Cell::from(compact_number(pick(a))),
            Cell::from(compact_number(pick(b))),
            Cell::from(compact_number(pick(blended))).style(Style::default().fg(Color::Cyan)),
            change_cell(change),
        ])
    };

    let rows = vec![
        metric("Sum of lights", |s| s.gdp_proxy_sol, changes.gdp_proxy_change),
        metric("Urban km²", |s| s.urban_area_sqkm, changes.urban_area_change),
        metric("Mean intensity", |s| s.mean_intensity, changes.mean_intensity_change),
        metric("Max intensity", |s| s.max_intensity, changes.max_intensity_change),
        metric("Lit pixels", |s| s.lit_pixels, changes.lit_pixels_change),
    ];

    let header = Row::new(vec![
        Cell::from("Metric"),
        Cell::from(a.year.to_string()),
        Cell::from(b.year.to_string()),
        Cell::from("Blend"),
        Cell::from("Change"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let widths = [
        Constraint::Length(16),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Min(8),
    ];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(format!(" {} ", comparison.region))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(table, area);
}

fn render_blend_slider(app: &App, f: &mut Frame<'_>, area: Rect, comparison: &Comparison) {
    let blend = app.compare.blend;
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Blend ([ / ]) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
        .percent(u16::from(blend))
        .label(format!(
            "{} {}% | {}% {}",
            comparison.year1.year,
            100 - blend,
            blend,
            comparison.year2.year
        ));
    f.render_widget(gauge, area);
}

fn detail_line<'a>(label: &'a str, value: String) -> TextLine<'a> {
    TextLine::from(vec![
        Span::styled(format!("{label:<18}"), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::Yellow)),
    ])
}

fn render_details(app: &App, f: &mut Frame<'_>, area: Rect, comparison: &Comparison) {
    let stats = &comparison.difference_stats;
    let insights = &comparison.insights;
    let mut lines = vec![
        TextLine::from(Span::styled(
            "Pixel differences",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        detail_line("Mean change", format!("{:+.3}", stats.mean_change)),
        detail_line("Max increase", format!("{:.3}", stats.max_increase)),
        detail_line("Max decrease", format!("{:.3}", stats.max_decrease)),
        detail_line("Brightened", stats.brightened_pixels.to_string()),
        detail_line("Darkened", stats.darkened_pixels.to_string()),
        detail_line("Unchanged", stats.unchanged_pixels.to_string()),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Trend",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    if !insights.overall_trend.is_empty() {
        lines.push(detail_line("Overall", insights.overall_trend.clone()));
    }
    if !insights.fastest_growing_sector.is_empty() {
        lines.push(detail_line(
            "Fastest sector",
            format!(
                "{} ({:+.1}%)",
                insights.fastest_growing_sector, insights.fastest_sector_growth
            ),
        ));
    }
    lines.push(detail_line(
        "Economic growth",
        format!("{:+.1}%", insights.economic_growth_rate),
    ));
    lines.push(detail_line(
        "Urbanization",
        format!("{:+.1}%", insights.urbanization_rate),
    ));

    let images = [
        (comparison.year1.year, comparison.images.year1_png.as_deref()),
        (comparison.year2.year, comparison.images.year2_png.as_deref()),
    ];
    if images.iter().any(|(_, path)| path.is_some()) {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(Span::styled(
            "Images",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        let available = images
            .into_iter()
            .filter_map(|(year, path)| path.map(|path| (year, path)));
        for (year, path) in available {
            lines.push(TextLine::from(vec![
                Span::styled(format!("{year} "), Style::default().fg(Color::Gray)),
                Span::styled(
                    image_url(&app.config.api_base_url, path),
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(" Details ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
