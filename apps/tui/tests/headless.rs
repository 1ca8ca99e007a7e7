mod common;

use common::{test_config, FakeBackend};
use quatsch_tui::event::build_headless_report;

#[tokio::test]
async fn headless_report_summarises_region() -> Result<(), Box<dyn std::error::Error>> {
    let backend = FakeBackend::new();
    let config = test_config();

    let report = build_headless_report(backend.as_ref(), &config, "Tamil Nadu")
        .await
        .map_err(|e| e.to_string())?;

    assert_eq!(report.region, "tamil nadu");
    assert_eq!(report.display_name, "Tamil Nadu");
    assert_eq!(report.year, 2024);
    assert_eq!(report.data_points, 1);
    assert_eq!(report.points_in_view, 1);
    // Empty backend insights fall back to local ones
    assert!(!report.insights.is_empty());
    assert_eq!(backend.count("nightlights 2024 10"), 1);

    let json = serde_json::to_value(&report)?;
    assert_eq!(json["center"]["lat"], 11.1271);

    Ok(())
}

#[tokio::test]
async fn headless_report_rejects_unknown_region() {
    let backend = FakeBackend::new();
    let result = build_headless_report(backend.as_ref(), &test_config(), "zzzz-nonexistent").await;

    assert!(result.is_err());
    assert_eq!(backend.count("nightlights"), 0);
}

#[tokio::test]
async fn headless_report_surfaces_backend_failure() {
    let backend = FakeBackend::failing();
    let result = build_headless_report(backend.as_ref(), &test_config(), "kerala").await;

    let message = format!("{:#}", result.err().unwrap());
    assert!(message.contains("backend unreachable"));
}
