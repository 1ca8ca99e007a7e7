use crate::api::models::{Anomaly, AnomalyReport, GrowthReport};
use crate::explorer::gazetteer::normalize;
use crate::explorer::{Fetcher, Ticket};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrowthKey {
    pub region: String,
    pub start_year: i32,
    pub end_year: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisField {
    StartYear,
    EndYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisTab {
    Growth,
    Hotspots,
    Anomalies,
}

impl AnalysisTab {
    pub const ALL: [Self; 3] = [Self::Growth, Self::Hotspots, Self::Anomalies];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Growth => "Growth",
            Self::Hotspots => "Hotspots",
            Self::Anomalies => "Anomalies",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|tab| *tab == self).unwrap_or(0)
    }
}

/// Growth timeline and anomaly detection for one region.
#[derive(Debug, Clone)]
pub struct AnalysisState {
    pub region: String,
    pub editing: bool,
    pub start_year: i32,
    pub end_year: i32,
    pub field: AnalysisField,
    pub tab: AnalysisTab,
    pub notice: Option<String>,
    pub growth: Fetcher<GrowthKey, GrowthReport>,
    pub anomalies: Fetcher<String, AnomalyReport>,
    pub row_offset: usize,
}

impl AnalysisState {
    pub fn new(start_year: i32, end_year: i32) -> Self {
        Self {
            region: "tamil nadu".to_string(),
            editing: false,
            start_year,
            end_year,
            field: AnalysisField::StartYear,
            tab: AnalysisTab::Growth,
            notice: None,
            growth: Fetcher::new(),
            anomalies: Fetcher::new(),
            row_offset: 0,
        }
    }

    /// Validate the form and issue both requests.
    pub fn run(&mut self) -> Result<(Ticket<GrowthKey>, Ticket<String>), String> {
        let region = normalize(&self.region);
        if region.is_empty() {
            return Err(self.reject("Region is required"));
        }
        if self.start_year > self.end_year {
            return Err(self.reject("Start year must not be after end year"));
        }

        self.notice = None;
        self.row_offset = 0;
        let growth = self.growth.begin(GrowthKey {
            region: region.clone(),
            start_year: self.start_year,
            end_year: self.end_year,
        });
        let anomalies = self.anomalies.begin(region);
        Ok((growth, anomalies))
    }

    fn reject(&mut self, reason: &str) -> String {
        self.notice = Some(reason.to_string());
        reason.to_string()
    }

    pub fn selected_year_mut(&mut self) -> &mut i32 {
        match self.field {
            AnalysisField::StartYear => &mut self.start_year,
            AnalysisField::EndYear => &mut self.end_year,
        }
    }
}

/// Anomalies ordered by intensity gain, strongest first.
pub fn ranked_anomalies(report: &AnomalyReport) -> Vec<&Anomaly> {
    let mut ranked: Vec<&Anomaly> = report.anomalies.iter().collect();
    ranked.sort_by(|a, b| b.intensity_gain.total_cmp(&a.intensity_gain));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_range_is_rejected_before_any_request() {
        let mut analysis = AnalysisState::new(2022, 2018);
        assert!(analysis.run().is_err());
        assert_eq!(analysis.growth.issued(), 0);
        assert!(analysis.notice.is_some());
    }

    #[test]
    fn run_issues_growth_and_anomaly_requests() {
        let mut analysis = AnalysisState::new(2014, 2020);
        analysis.region = "  Jharkhand ".to_string();
        let (growth, anomalies) = analysis.run().unwrap();
        assert_eq!(growth.key.region, "jharkhand");
        assert_eq!(growth.key.start_year, 2014);
        assert_eq!(anomalies.key, "jharkhand");
    }

    #[test]
    fn anomalies_rank_by_gain() {
        let anomaly = |id, gain| Anomaly {
            id,
            lat: 0.0,
            lon: 0.0,
            pixel_count: 1,
            current_intensity: 0.0,
            baseline_intensity: 0.0,
            intensity_gain: gain,
            max_brightness: 0.0,
        };
        let report = AnomalyReport {
            anomalies: vec![anomaly(1, 2.0), anomaly(2, 9.5), anomaly(3, 4.0)],
            ..AnomalyReport::default()
        };
        let ids: Vec<u32> = ranked_anomalies(&report).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
