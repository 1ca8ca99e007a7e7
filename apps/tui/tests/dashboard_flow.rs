mod common;

use common::{app_with, settle, sign_in, FakeBackend};
use crossterm::event::KeyCode;
use quatsch_tui::api::models::InsightItem;
use quatsch_tui::app::handle_input;
use quatsch_tui::explorer::FetchState;
use quatsch_tui::{LatLon, Page};
use std::time::Duration;

fn type_text(app: &mut quatsch_tui::App, text: &str) {
    for c in text.chars() {
        handle_input(app, KeyCode::Char(c));
    }
}

#[tokio::test]
async fn changing_year_issues_exactly_one_fetch() {
    let backend = FakeBackend::new();
    let mut app = app_with(backend.clone());

    app.set_dashboard_year(2020);
    // Same key again: nothing new goes out
    app.refresh_dashboard();

    assert_eq!(settle(&mut app, 1).await, 1);
    assert_eq!(backend.nightlights_years(), vec![2020]);
    let data = app.dashboard.nightlights.state().value().unwrap();
    assert!((data.data_points[0].value - 2020.0).abs() < f64::EPSILON);
}

#[tokio::test(start_paused = true)]
async fn rapid_year_changes_apply_only_the_last() {
    let backend = FakeBackend::new();
    backend.delay_year(2021, Duration::from_millis(300));
    backend.delay_year(2022, Duration::from_millis(150));
    let mut app = app_with(backend.clone());

    app.set_dashboard_year(2021);
    app.set_dashboard_year(2022);
    app.set_dashboard_year(2023);

    // 2023 lands first, the two older replies arrive late and are dropped
    assert_eq!(settle(&mut app, 3).await, 1);
    let mut requested = backend.nightlights_years();
    requested.sort_unstable();
    assert_eq!(requested, vec![2021, 2022, 2023]);

    let state = app.dashboard.nightlights.state();
    let data = state.value().unwrap();
    assert!((data.data_points[0].value - 2023.0).abs() < f64::EPSILON);
    assert_eq!(app.dashboard.nightlights.key().map(|key| key.year), Some(2023));
}

#[tokio::test]
async fn search_keys_resolve_region_and_move_map() {
    let backend = FakeBackend::new();
    backend.set_insights(vec![InsightItem::Text("Chennai keeps brightening".to_string())]);
    let mut app = app_with(backend.clone());
    sign_in(&mut app);
    app.navigate(Page::Dashboard);
    assert_eq!(settle(&mut app, 1).await, 1);

    handle_input(&mut app, KeyCode::Char('/'));
    assert!(app.dashboard.editing);
    // 'q' is text while the search box is open
    type_text(&mut app, "  Tamil Nadu q");
    assert!(app.running);
    for _ in 0..2 {
        handle_input(&mut app, KeyCode::Backspace);
    }
    handle_input(&mut app, KeyCode::Enter);

    let region = app.dashboard.region.unwrap();
    assert_eq!(region.key, "tamil nadu");
    assert_eq!(region.center, LatLon::new(11.1271, 78.6569));
    assert!((region.zoom - 6.8).abs() < f64::EPSILON);
    assert_eq!(app.dashboard.map.viewport().center, region.center);

    // New region means a new data key plus an insights request
    settle(&mut app, 2).await;
    assert_eq!(backend.count("nightlights"), 2);
    assert_eq!(backend.count("insights tamil nadu 2024"), 1);
    let insights = app.dashboard.insights.state().value().unwrap();
    assert_eq!(insights[0].text, "Chennai keeps brightening");
}

#[tokio::test]
async fn failed_search_leaves_viewport_alone() {
    let backend = FakeBackend::new();
    let mut app = app_with(backend.clone());
    sign_in(&mut app);
    app.page = Page::Dashboard;

    let before = app.dashboard.map.viewport();
    handle_input(&mut app, KeyCode::Char('s'));
    type_text(&mut app, "zzzz-nonexistent");
    handle_input(&mut app, KeyCode::Enter);

    assert_eq!(app.dashboard.map.viewport(), before);
    assert!(app.dashboard.region.is_none());
    assert!(app.dashboard.notice.is_some());
    assert_eq!(backend.count("nightlights"), 0);
}

#[tokio::test]
async fn insights_fall_back_when_backend_errors() {
    let backend = FakeBackend::failing();
    let insights =
        quatsch_tui::explorer::load_insights(backend.as_ref(), "tamil nadu", 2021, 5).await;

    assert!(!insights.is_empty());
    assert!(insights
        .iter()
        .all(|insight| insight.source.as_deref() == Some("Analysis")));
    assert!(insights[0].text.contains("Tamil Nadu"));
    assert_eq!(backend.count("insights"), 1);
}

#[tokio::test]
async fn insights_fall_back_when_backend_returns_nothing() {
    let backend = FakeBackend::new();
    let insights = quatsch_tui::explorer::load_insights(backend.as_ref(), "usa", 2019, 5).await;
    assert!(insights[0].text.starts_with("United States"));
}

#[tokio::test]
async fn unreachable_backend_fails_the_data_layer() {
    let backend = FakeBackend::failing();
    let mut app = app_with(backend);

    app.set_dashboard_year(2018);
    settle(&mut app, 1).await;

    match app.dashboard.nightlights.state() {
        FetchState::Failure(reason) => assert!(reason.contains("backend unreachable")),
        other => panic!("expected failure, got {other:?}"),
    }
}
