use crate::domain::LatLon;
use serde::{Deserialize, Serialize};

/// Fields every backend reply carries.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
}

/// Reply shape shared by the auth endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub authenticated: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub lat: f64,
    pub lon: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RasterStatistics {
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: f64,
    #[serde(default)]
    pub mean_all: f64,
    #[serde(default)]
    pub mean_lit: f64,
    #[serde(default)]
    pub std_dev: f64,
    #[serde(default)]
    pub total_pixels: u64,
    #[serde(default)]
    pub lit_pixels: u64,
    #[serde(default)]
    pub dark_pixels: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NightlightsMetadata {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub statistics: Option<RasterStatistics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NightlightsData {
    #[serde(default)]
    pub data_points: Vec<DataPoint>,
    #[serde(default)]
    pub center: Option<LatLon>,
    #[serde(default)]
    pub metadata: Option<NightlightsMetadata>,
}

impl NightlightsData {
    pub fn max_value(&self) -> f64 {
        self.data_points
            .iter()
            .map(|point| point.value)
            .fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NightlightsReply {
    pub data: NightlightsData,
}

/// Insight entries arrive either as bare strings or as detailed objects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum InsightItem {
    Text(String),
    Detailed {
        text: String,
        #[serde(default)]
        source: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightsReply {
    #[serde(default)]
    pub insights: Vec<InsightItem>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorBreakdown {
    #[serde(default)]
    pub rural: f64,
    #[serde(default)]
    pub urban: f64,
    #[serde(default)]
    pub industrial: f64,
}

/// One year of aggregated lighting statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearSnapshot {
    pub year: i32,
    #[serde(default)]
    pub gdp_proxy_sol: f64,
    #[serde(default)]
    pub urban_area_sqkm: f64,
    #[serde(default)]
    pub mean_intensity: f64,
    #[serde(default)]
    pub max_intensity: f64,
    #[serde(default)]
    pub lit_pixels: f64,
    #[serde(default)]
    pub dark_pixels: f64,
    #[serde(default)]
    pub sector_breakdown: SectorBreakdown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthMetadata {
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub years_analyzed: Vec<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthInsights {
    #[serde(default)]
    pub total_economic_growth: f64,
    #[serde(default)]
    pub industrial_expansion: f64,
    #[serde(default)]
    pub urban_expansion: f64,
    #[serde(default)]
    pub rural_growth: f64,
    #[serde(default)]
    pub urban_sprawl_sqkm: f64,
    #[serde(default)]
    pub fastest_growing_sector: String,
    #[serde(default)]
    pub mean_intensity_increase: f64,
    #[serde(default)]
    pub max_intensity_increase: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YoyGrowth {
    pub year: i32,
    pub growth_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub growth_pct: f64,
    #[serde(default)]
    pub intensity: f64,
    #[serde(default, rename = "type")]
    pub zone_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthReport {
    #[serde(default)]
    pub metadata: GrowthMetadata,
    #[serde(default)]
    pub insights: GrowthInsights,
    #[serde(default)]
    pub timeline: Vec<YearSnapshot>,
    #[serde(default)]
    pub yoy_growth: Vec<YoyGrowth>,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub id: u32,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub pixel_count: u64,
    #[serde(default)]
    pub current_intensity: f64,
    #[serde(default)]
    pub baseline_intensity: f64,
    #[serde(default)]
    pub intensity_gain: f64,
    #[serde(default)]
    pub max_brightness: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalySummary {
    #[serde(default)]
    pub total_anomalies: u64,
    #[serde(default)]
    pub total_anomalous_pixels: u64,
    #[serde(default)]
    pub overall_lighting_growth: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub target_year: Option<i32>,
    #[serde(default)]
    pub detection_method: Option<String>,
    #[serde(default)]
    pub anomalies: Vec<Anomaly>,
    #[serde(default)]
    pub results: AnomalySummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonChanges {
    #[serde(default)]
    pub gdp_proxy_change: f64,
    #[serde(default)]
    pub urban_area_change: f64,
    #[serde(default)]
    pub mean_intensity_change: f64,
    #[serde(default)]
    pub max_intensity_change: f64,
    #[serde(default)]
    pub lit_pixels_change: f64,
    #[serde(default)]
    pub sector_changes: SectorBreakdown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DifferenceStats {
    #[serde(default)]
    pub mean_change: f64,
    #[serde(default)]
    pub max_increase: f64,
    #[serde(default)]
    pub max_decrease: f64,
    #[serde(default)]
    pub std_dev: f64,
    #[serde(default)]
    pub brightened_pixels: u64,
    #[serde(default)]
    pub darkened_pixels: u64,
    #[serde(default)]
    pub unchanged_pixels: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonImages {
    #[serde(default)]
    pub year1_png: Option<String>,
    #[serde(default)]
    pub year2_png: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonInsights {
    #[serde(default)]
    pub overall_trend: String,
    #[serde(default)]
    pub fastest_growing_sector: String,
    #[serde(default)]
    pub fastest_sector_growth: f64,
    #[serde(default)]
    pub urbanization_rate: f64,
    #[serde(default)]
    pub economic_growth_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    #[serde(default)]
    pub region: String,
    pub year1: YearSnapshot,
    pub year2: YearSnapshot,
    #[serde(default)]
    pub changes: ComparisonChanges,
    #[serde(default)]
    pub difference_stats: DifferenceStats,
    #[serde(default)]
    pub images: ComparisonImages,
    #[serde(default)]
    pub insights: ComparisonInsights,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AvailableYears {
    #[serde(default)]
    pub years: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionFolder {
    pub name: String,
    #[serde(default)]
    pub folder: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AvailableRegions {
    #[serde(default)]
    pub regions: Vec<RegionFolder>,
}
