#![allow(dead_code)]

use async_trait::async_trait;
use quatsch_tui::api::models::{
    AnomalyReport, AuthReply, Comparison, DataPoint, GrowthReport, InsightItem, NightlightsData,
    RegionFolder, User, YearSnapshot,
};
use quatsch_tui::api::{ApiError, ExplorerBackend};
use quatsch_tui::app::ApiEvent;
use quatsch_tui::config::AppConfig;
use quatsch_tui::App;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const VALID_OTP: &str = "123456";

/// In-process backend that records every call and can be told to fail.
#[derive(Default)]
pub struct FakeBackend {
    calls: Mutex<Vec<String>>,
    nightlights_years: Mutex<Vec<i32>>,
    delays: Mutex<HashMap<i32, Duration>>,
    failing: AtomicBool,
    insights: Mutex<Vec<InsightItem>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let backend = Self::default();
        backend.failing.store(true, Ordering::SeqCst);
        Arc::new(backend)
    }

    /// Delay the night-lights reply for `year`.
    pub fn delay_year(&self, year: i32, delay: Duration) {
        self.delays.lock().unwrap().insert(year, delay);
    }

    pub fn set_insights(&self, items: Vec<InsightItem>) {
        *self.insights.lock().unwrap() = items;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    pub fn nightlights_years(&self) -> Vec<i32> {
        self.nightlights_years.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(ApiError::NetworkUnreachable("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

fn snapshot(year: i32, sol: f64) -> YearSnapshot {
    YearSnapshot {
        year,
        gdp_proxy_sol: sol,
        mean_intensity: sol / 1000.0,
        ..YearSnapshot::default()
    }
}

#[async_trait]
impl ExplorerBackend for FakeBackend {
    async fn check_session(&self) -> Result<AuthReply, ApiError> {
        self.record("check_session".to_string());
        self.check()?;
        Ok(AuthReply {
            success: true,
            authenticated: Some(false),
            ..AuthReply::default()
        })
    }

    async fn send_otp(&self, email: &str) -> Result<AuthReply, ApiError> {
        self.record(format!("send_otp {email}"));
        self.check()?;
        Ok(AuthReply {
            success: true,
            message: Some("OTP sent to your email".to_string()),
            ..AuthReply::default()
        })
    }

    async fn verify_otp(&self, email: &str, otp: &str) -> Result<AuthReply, ApiError> {
        self.record(format!("verify_otp {email}"));
        self.check()?;
        if otp != VALID_OTP {
            return Err(ApiError::Server {
                status: 400,
                message: "Invalid OTP".to_string(),
            });
        }
        Ok(AuthReply {
            success: true,
            message: Some("Login successful".to_string()),
            user: Some(User {
                email: email.to_string(),
            }),
            authenticated: Some(true),
        })
    }

    async fn logout(&self) -> Result<AuthReply, ApiError> {
        self.record("logout".to_string());
        self.check()?;
        Ok(AuthReply {
            success: true,
            ..AuthReply::default()
        })
    }

    async fn nightlights(&self, year: i32, sample_rate: u32) -> Result<NightlightsData, ApiError> {
        self.record(format!("nightlights {year} {sample_rate}"));
        self.nightlights_years.lock().unwrap().push(year);
        let delay = self.delays.lock().unwrap().get(&year).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check()?;
        Ok(NightlightsData {
            data_points: vec![DataPoint {
                lat: 11.0,
                lon: 78.6,
                value: f64::from(year),
            }],
            ..NightlightsData::default()
        })
    }

    async fn insights(
        &self,
        region: &str,
        year: i32,
        _max_results: u32,
    ) -> Result<Vec<InsightItem>, ApiError> {
        self.record(format!("insights {region} {year}"));
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApiError::Server {
                status: 500,
                message: "Internal server error".to_string(),
            });
        }
        Ok(self.insights.lock().unwrap().clone())
    }

    async fn growth(
        &self,
        region: &str,
        start_year: i32,
        end_year: i32,
    ) -> Result<GrowthReport, ApiError> {
        self.record(format!("growth {region} {start_year} {end_year}"));
        self.check()?;
        Ok(GrowthReport {
            timeline: (start_year..=end_year)
                .map(|year| snapshot(year, f64::from(year - 2000) * 1000.0))
                .collect(),
            ..GrowthReport::default()
        })
    }

    async fn anomalies(&self, region: &str) -> Result<AnomalyReport, ApiError> {
        self.record(format!("anomalies {region}"));
        self.check()?;
        Ok(AnomalyReport {
            region: region.to_string(),
            ..AnomalyReport::default()
        })
    }

    async fn compare(&self, region: &str, year1: i32, year2: i32) -> Result<Comparison, ApiError> {
        self.record(format!("compare {region} {year1} {year2}"));
        self.check()?;
        Ok(Comparison {
            region: region.to_string(),
            year1: snapshot(year1, 1000.0),
            year2: snapshot(year2, 3000.0),
            ..Comparison::default()
        })
    }

    async fn available_years(&self) -> Result<Vec<i32>, ApiError> {
        self.record("available_years".to_string());
        self.check()?;
        Ok((2014..=2024).collect())
    }

    async fn available_regions(&self) -> Result<Vec<RegionFolder>, ApiError> {
        self.record("available_regions".to_string());
        self.check()?;
        Ok(vec![RegionFolder {
            name: "Tamil Nadu".to_string(),
            folder: "tamil_nadu".to_string(),
        }])
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        default_year: 2024,
        ..AppConfig::default()
    }
}

pub fn app_with(backend: Arc<FakeBackend>) -> App {
    App::new(test_config(), backend)
}

pub fn sign_in(app: &mut App) {
    app.auth.apply_session_check(Ok(AuthReply {
        success: true,
        user: Some(User {
            email: "analyst@example.com".to_string(),
        }),
        authenticated: Some(true),
        ..AuthReply::default()
    }));
}

/// Receive `count` backend events and apply them in arrival order.
/// Returns how many were applied rather than discarded as stale.
pub async fn settle(app: &mut App, count: usize) -> usize {
    let mut applied = 0;
    for _ in 0..count {
        let event: ApiEvent = tokio::time::timeout(Duration::from_secs(5), app.next_event())
            .await
            .expect("backend event did not arrive")
            .expect("event channel closed");
        if app.apply(event) {
            applied += 1;
        }
    }
    applied
}
