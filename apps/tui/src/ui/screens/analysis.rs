use crate::api::models::{AnomalyReport, GrowthReport};
use crate::app::analysis::{ranked_anomalies, AnalysisField, AnalysisTab};
use crate::app::App;
use crate::ui::widgets::charts::{compact_number, render_timeline_chart, render_yoy_barchart};
use crate::ui::widgets::status::{fetch_line, render_fetch_placeholder};
use crate::ui::widgets::tables::clamp_offset;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap};
use ratatui::Frame;

pub fn render_analysis(app: &App, f: &mut Frame<'_>, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Form
            Constraint::Length(1), // Tabs
            Constraint::Min(6),    // Content
        ])
        .split(area);

    render_form(app, f, layout[0]);
    render_tabs(app, f, layout[1]);

    match app.analysis.tab {
        AnalysisTab::Growth => render_growth(app, f, layout[2]),
        AnalysisTab::Hotspots => render_hotspots(app, f, layout[2]),
        AnalysisTab::Anomalies => render_anomalies(app, f, layout[2]),
    }
}

fn form_value(value: String, selected: bool) -> Span<'static> {
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    Span::styled(value, style)
}

fn render_form(app: &App, f: &mut Frame<'_>, area: Rect) {
    let analysis = &app.analysis;
    let label = Style::default().fg(Color::Cyan);
    let region = if analysis.editing {
        format!("{}_", analysis.region)
    } else {
        analysis.region.clone()
    };

    let mut lines = vec![TextLine::from(vec![
        Span::styled("Region ", label),
        form_value(region, analysis.editing),
        Span::styled("   From ", label),
        form_value(
            analysis.start_year.to_string(),
            !analysis.editing && analysis.field == AnalysisField::StartYear,
        ),
        Span::styled("   To ", label),
        form_value(
            analysis.end_year.to_string(),
            !analysis.editing && analysis.field == AnalysisField::EndYear,
        ),
    ])];

    let mut status = Vec::new();
    if let Some(notice) = &analysis.notice {
        status.push(Span::styled(notice.as_str(), Style::default().fg(Color::Red)));
    } else if let Some(line) = fetch_line(analysis.growth.state(), &app.throbber, "growth analysis")
    {
        status.extend(line.spans);
    }
    lines.push(TextLine::from(status));

    let paragraph = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .title(" Growth analysis (Enter to run) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(paragraph, area);
}

fn render_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = AnalysisTab::ALL
        .iter()
        .map(|tab| TextLine::from(tab.label()))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(app.analysis.tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

fn render_growth(app: &App, f: &mut Frame<'_>, area: Rect) {
    let state = app.analysis.growth.state();
    let Some(report) = state.value() else {
        render_fetch_placeholder(f, area, state, &app.throbber, "growth analysis", "Growth");
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);
    let charts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(columns[0]);

    render_timeline_chart(f, charts[0], &report.timeline);
    render_yoy_barchart(f, charts[1], &report.yoy_growth);
    render_headline(f, columns[1], report);
}

fn headline_line<'a>(label: &'a str, value: String, color: Color) -> TextLine<'a> {
    TextLine::from(vec![
        Span::styled(format!("{label:<20}"), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

fn signed_color(value: f64) -> Color {
    if value < 0.0 {
        Color::Red
    } else {
        Color::Green
    }
}

fn render_headline(f: &mut Frame<'_>, area: Rect, report: &GrowthReport) {
    let insights = &report.insights;
    let mut lines = vec![
        TextLine::from(Span::styled(
            format!("{} {}", report.metadata.region, report.metadata.range),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        headline_line(
            "Economic growth",
            format!("{:+.1}%", insights.total_economic_growth),
            signed_color(insights.total_economic_growth),
        ),
        headline_line(
            "Industrial",
            format!("{:+.1}%", insights.industrial_expansion),
            signed_color(insights.industrial_expansion),
        ),
        headline_line(
            "Urban",
            format!("{:+.1}%", insights.urban_expansion),
            signed_color(insights.urban_expansion),
        ),
        headline_line(
            "Rural",
            format!("{:+.1}%", insights.rural_growth),
            signed_color(insights.rural_growth),
        ),
        headline_line(
            "Urban sprawl",
            format!("{:+.1} km²", insights.urban_sprawl_sqkm),
            signed_color(insights.urban_sprawl_sqkm),
        ),
        headline_line(
            "Mean intensity",
            format!("{:+.1}%", insights.mean_intensity_increase),
            signed_color(insights.mean_intensity_increase),
        ),
    ];
    if !insights.fastest_growing_sector.is_empty() {
        lines.push(headline_line(
            "Fastest sector",
            insights.fastest_growing_sector.clone(),
            Color::Cyan,
        ));
    }
    if let Some(last) = report.timeline.last() {
        lines.push(headline_line(
            "Latest SOL",
            compact_number(last.gdp_proxy_sol),
            Color::Yellow,
        ));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(" Headline ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn header_row(labels: &[&'static str]) -> Row<'static> {
    Row::new(labels.iter().map(|label| Cell::from(*label)).collect::<Vec<_>>()).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn render_hotspots(app: &App, f: &mut Frame<'_>, area: Rect) {
    let state = app.analysis.growth.state();
    let Some(report) = state.value() else {
        render_fetch_placeholder(f, area, state, &app.throbber, "growth analysis", "Hotspots");
        return;
    };

    let visible = usize::from(area.height.saturating_sub(4));
    let offset = clamp_offset(report.hotspots.len(), visible, app.analysis.row_offset);
    let rows = report.hotspots.iter().skip(offset).take(visible).map(|hotspot| {
        Row::new(vec![
            Cell::from(format!("{:.3}", hotspot.lat)),
            Cell::from(format!("{:.3}", hotspot.lon)),
            Cell::from(format!("{:+.1}%", hotspot.growth_pct)),
            Cell::from(format!("{:.2}", hotspot.intensity)),
            Cell::from(hotspot.zone_type.clone()),
        ])
        .style(Style::default().fg(signed_color(hotspot.growth_pct)))
    });

    let widths = [
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths)
        .header(header_row(&["Lat", "Lon", "Growth", "Intensity", "Zone"]))
        .block(
            Block::default()
                .title(format!(" Hotspots ({}) ", report.hotspots.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(table, area);
}

fn anomaly_summary(report: &AnomalyReport) -> TextLine<'static> {
    let mut spans = vec![
        Span::styled("Anomalies ", Style::default().fg(Color::Gray)),
        Span::styled(
            report.results.total_anomalies.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Overall lighting growth ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{:+.1}%", report.results.overall_lighting_growth),
            Style::default()
                .fg(signed_color(report.results.overall_lighting_growth))
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(year) = report.target_year {
        spans.push(Span::styled(
            format!("   Target year {year}"),
            Style::default().fg(Color::Gray),
        ));
    }
    TextLine::from(spans)
}

fn render_anomalies(app: &App, f: &mut Frame<'_>, area: Rect) {
    let state = app.analysis.anomalies.state();
    let Some(report) = state.value() else {
        render_fetch_placeholder(f, area, state, &app.throbber, "anomaly detection", "Anomalies");
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(4)])
        .split(area);
    f.render_widget(Paragraph::new(anomaly_summary(report)), chunks[0]);

    let ranked = ranked_anomalies(report);
    let visible = usize::from(chunks[1].height.saturating_sub(4));
    let offset = clamp_offset(ranked.len(), visible, app.analysis.row_offset);
    let rows = ranked.iter().skip(offset).take(visible).map(|anomaly| {
        Row::new(vec![
            Cell::from(anomaly.id.to_string()),
            Cell::from(format!("{:.3}, {:.3}", anomaly.lat, anomaly.lon)),
            Cell::from(anomaly.pixel_count.to_string()),
            Cell::from(format!("{:.2}", anomaly.baseline_intensity)),
            Cell::from(format!("{:.2}", anomaly.current_intensity)),
            Cell::from(format!("{:+.2}", anomaly.intensity_gain)),
        ])
    });

    let widths = [
        Constraint::Length(5),
        Constraint::Length(20),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Min(8),
    ];
    let method = report
        .detection_method
        .as_deref()
        .unwrap_or("baseline comparison");
    let table = Table::new(rows, widths)
        .header(header_row(&["ID", "Location", "Pixels", "Baseline", "Current", "Gain"]))
        .block(
            Block::default()
                .title(format!(" Anomalies by gain ({method}) "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        );
    f.render_widget(table, chunks[1]);
}
