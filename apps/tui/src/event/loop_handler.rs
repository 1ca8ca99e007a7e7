use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use serde::Serialize;
use std::io::Stdout;
use std::time::Duration;
use tracing::{debug, info};

use crate::api::models::RasterStatistics;
use crate::api::ExplorerBackend;
use crate::app::{handle_input, App};
use crate::config::AppConfig;
use crate::domain::LatLon;
use crate::explorer::fetch::failure_reason;
use crate::explorer::insights::normalize_region_name;
use crate::explorer::{load_insights, Gazetteer, Insight, Viewport};
use crate::ui;

/// Summary printed by `--headless`.
#[derive(Debug, Serialize)]
pub struct HeadlessReport {
    pub region: String,
    pub display_name: String,
    pub center: LatLon,
    pub zoom: f64,
    pub year: i32,
    pub sample_rate: u32,
    pub data_points: usize,
    pub points_in_view: usize,
    pub brightest: f64,
    pub statistics: Option<RasterStatistics>,
    pub insights: Vec<Insight>,
}

/// Resolve `region`, then fetch its night-lights summary and insights.
pub async fn build_headless_report(
    backend: &dyn ExplorerBackend,
    config: &AppConfig,
    region: &str,
) -> Result<HeadlessReport> {
    let gazetteer = Gazetteer::default();
    let entry = *gazetteer
        .resolve(region)
        .wrap_err_with(|| format!("Cannot summarise \"{region}\""))?;
    let year = config.default_year;
    info!(region = entry.key, year, "building headless report");

    let data = backend
        .nightlights(year, config.sample_rate)
        .await
        .map_err(|e| eyre!("Night-lights request failed: {}", failure_reason(&e)))?;

    let viewport = Viewport::from(&entry);
    let points_in_view = data
        .data_points
        .iter()
        .filter(|point| viewport.contains(LatLon::new(point.lat, point.lon)))
        .count();

    let insights = load_insights(backend, entry.key, year, config.max_insights).await;

    Ok(HeadlessReport {
        region: entry.key.to_string(),
        display_name: normalize_region_name(entry.key),
        center: entry.center,
        zoom: entry.zoom,
        year,
        sample_rate: config.sample_rate,
        data_points: data.data_points.len(),
        points_in_view,
        brightest: data.max_value(),
        statistics: data.metadata.and_then(|metadata| metadata.statistics),
        insights,
    })
}

/// Run the application in headless mode (no UI)
pub async fn run_headless(
    backend: &dyn ExplorerBackend,
    config: &AppConfig,
    region: &str,
    json: bool,
) -> Result<()> {
    let report = build_headless_report(backend, config, region).await?;

    if json {
        let json = serde_json::to_string_pretty(&report)?;
        println!("{json}");
    } else {
        render_headless_text(&report);
    }

    Ok(())
}

fn render_headless_text(report: &HeadlessReport) {
    println!("\n{} night lights, {}", report.display_name, report.year);
    println!("=================================");
    println!(
        "Center: {:.4}, {:.4} (zoom {:.1})",
        report.center.lat, report.center.lon, report.zoom
    );
    println!(
        "Data points: {} total, {} in view (sample 1/{})",
        report.data_points, report.points_in_view, report.sample_rate
    );
    println!("Brightest point: {:.2}", report.brightest);

    if let Some(stats) = &report.statistics {
        println!("Mean radiance (lit): {:.2}", stats.mean_lit);
        println!("Lit pixels: {} of {}", stats.lit_pixels, stats.total_pixels);
    }

    println!("\nInsights:");
    for insight in &report.insights {
        match &insight.source {
            Some(source) => println!("- {} [{source}]", insight.text),
            None => println!("- {}", insight.text),
        }
    }
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    while app.running {
        app.update();
        let applied = app.drain_events();
        if applied > 0 {
            debug!(applied, "backend events applied");
        }

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        // Polling blocks this worker thread briefly; spawned requests keep running on the others
        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(_) | Err(_) => {}
            }
        }

        tokio::task::yield_now().await;
    }

    info!("event loop finished");
    Ok(())
}
