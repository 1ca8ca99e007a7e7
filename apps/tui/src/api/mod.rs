// API module for quatsch_tui
// Typed access to the night-lights analytics backend

pub mod client;
pub mod error;
pub mod models;

pub use client::{decode_reply, image_url, ApiClient};
pub use error::ApiError;

use async_trait::async_trait;
use models::{
    AnomalyReport, AuthReply, Comparison, GrowthReport, InsightItem, NightlightsData, RegionFolder,
};

/// Everything the explorer asks of the backend.
///
/// [`ApiClient`] is the HTTP implementation; tests plug in an in-process fake.
#[async_trait]
pub trait ExplorerBackend: Send + Sync {
    async fn check_session(&self) -> Result<AuthReply, ApiError>;

    async fn send_otp(&self, email: &str) -> Result<AuthReply, ApiError>;

    async fn verify_otp(&self, email: &str, otp: &str) -> Result<AuthReply, ApiError>;

    async fn logout(&self) -> Result<AuthReply, ApiError>;

    async fn nightlights(&self, year: i32, sample_rate: u32) -> Result<NightlightsData, ApiError>;

    async fn insights(
        &self,
        region: &str,
        year: i32,
        max_results: u32,
    ) -> Result<Vec<InsightItem>, ApiError>;

    async fn growth(
        &self,
        region: &str,
        start_year: i32,
        end_year: i32,
    ) -> Result<GrowthReport, ApiError>;

    async fn anomalies(&self, region: &str) -> Result<AnomalyReport, ApiError>;

    async fn compare(&self, region: &str, year1: i32, year2: i32) -> Result<Comparison, ApiError>;

    async fn available_years(&self) -> Result<Vec<i32>, ApiError>;

    async fn available_regions(&self) -> Result<Vec<RegionFolder>, ApiError>;
}
