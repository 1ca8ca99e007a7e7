use crate::api::models::NightlightsData;
use crate::explorer::{DataRequest, Fetcher, Gazetteer, Insight, MapController, RegionEntry, Ticket};
use tracing::{debug, info};

/// Sample-rate choices offered by the dashboard, coarsest last.
pub const SAMPLE_RATES: [u32; 7] = [1, 2, 5, 10, 20, 50, 100];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InsightsKey {
    pub region: String,
    pub year: i32,
}

/// Map dashboard: region search, year slider, night-lights layer and insights.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub query: String,
    pub editing: bool,
    pub region: Option<RegionEntry>,
    pub notice: Option<String>,
    pub year: i32,
    pub sample_rate: u32,
    pub map: MapController,
    pub nightlights: Fetcher<DataRequest, NightlightsData>,
    pub insights: Fetcher<InsightsKey, Vec<Insight>>,
    pub insight_offset: usize,
}

impl DashboardState {
    pub fn new(year: i32, sample_rate: u32) -> Self {
        Self {
            query: String::new(),
            editing: false,
            region: None,
            notice: None,
            year,
            sample_rate,
            map: MapController::new(),
            nightlights: Fetcher::new(),
            insights: Fetcher::new(),
            insight_offset: 0,
        }
    }

    /// Current selection as a fetch key.
    pub fn data_request(&self) -> DataRequest {
        DataRequest::new(self.region.map(|entry| entry.key.to_string()), self.year)
            .with_param("sample_rate", self.sample_rate)
    }

    /// Resolve the search box. Only a hit moves the map.
    pub fn search(&mut self, gazetteer: &Gazetteer) -> bool {
        match gazetteer.resolve(&self.query) {
            Ok(entry) => {
                info!(query = %self.query, region = entry.key, "region resolved");
                self.region = Some(*entry);
                self.map.focus(entry);
                self.notice = None;
                self.editing = false;
                true
            }
            Err(e) => {
                debug!(query = %self.query, "region not found");
                self.notice = Some(e.to_string());
                false
            }
        }
    }

    pub fn clear_region(&mut self) {
        self.region = None;
        self.query.clear();
        self.notice = None;
        self.insights.reset();
        self.map.reset();
    }

    pub fn cycle_sample_rate(&mut self, finer: bool) {
        self.sample_rate = if finer {
            SAMPLE_RATES
                .iter()
                .rev()
                .find(|rate| **rate < self.sample_rate)
                .copied()
                .unwrap_or(SAMPLE_RATES[0])
        } else {
            SAMPLE_RATES
                .iter()
                .find(|rate| **rate > self.sample_rate)
                .copied()
                .unwrap_or(SAMPLE_RATES[SAMPLE_RATES.len() - 1])
        };
    }

    /// Start a night-lights fetch if the selection changed since the last one.
    pub fn refresh(&mut self) -> Option<Ticket<DataRequest>> {
        self.nightlights.request(self.data_request())
    }

    /// Insights are always refetched for the current region and year.
    pub fn reload_insights(&mut self) -> Option<Ticket<InsightsKey>> {
        let region = self.region?;
        self.insight_offset = 0;
        Some(self.insights.begin(InsightsKey {
            region: region.key.to_string(),
            year: self.year,
        }))
    }

    /// Apply a night-lights reply. A backend-preferred centre only moves the
    /// map when no region has been searched.
    pub fn apply_nightlights(
        &mut self,
        ticket: &Ticket<DataRequest>,
        outcome: Result<NightlightsData, crate::api::ApiError>,
    ) -> bool {
        let center = outcome.as_ref().ok().and_then(|data| data.center);
        let applied = self.nightlights.complete(ticket, outcome);
        if applied && self.region.is_none() {
            if let Some(center) = center {
                self.map.recenter(center);
            }
        }
        applied
    }
}
