use crate::api::models::{Comparison, SectorBreakdown, YearSnapshot};
use crate::explorer::gazetteer::normalize;
use crate::explorer::{Fetcher, Ticket};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompareKey {
    pub region: String,
    pub year1: i32,
    pub year2: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareField {
    Year1,
    Year2,
}

const BLEND_STEP: u8 = 10;

/// Side-by-side comparison of two years with a blend slider between them.
#[derive(Debug, Clone)]
pub struct CompareState {
    pub region: String,
    pub editing: bool,
    pub year1: i32,
    pub year2: i32,
    pub field: CompareField,
    /// 0 shows `year1`, 100 shows `year2`.
    pub blend: u8,
    pub notice: Option<String>,
    pub comparison: Fetcher<CompareKey, Comparison>,
}

impl CompareState {
    pub fn new(year1: i32, year2: i32) -> Self {
        Self {
            region: "tamil nadu".to_string(),
            editing: false,
            year1,
            year2,
            field: CompareField::Year1,
            blend: 50,
            notice: None,
            comparison: Fetcher::new(),
        }
    }

    pub fn run(&mut self) -> Result<Ticket<CompareKey>, String> {
        let region = normalize(&self.region);
        let reason = if region.is_empty() {
            Some("Region is required")
        } else if self.year1 == self.year2 {
            Some("Pick two different years to compare")
        } else {
            None
        };
        if let Some(reason) = reason {
            self.notice = Some(reason.to_string());
            return Err(reason.to_string());
        }

        self.notice = None;
        Ok(self.comparison.begin(CompareKey {
            region,
            year1: self.year1,
            year2: self.year2,
        }))
    }

    pub fn selected_year_mut(&mut self) -> &mut i32 {
        match self.field {
            CompareField::Year1 => &mut self.year1,
            CompareField::Year2 => &mut self.year2,
        }
    }

    pub fn nudge_blend(&mut self, towards_second: bool) {
        self.blend = if towards_second {
            self.blend.saturating_add(BLEND_STEP).min(100)
        } else {
            self.blend.saturating_sub(BLEND_STEP)
        };
    }

    /// Statistics at the current blend position.
    pub fn blended(&self) -> Option<YearSnapshot> {
        self.comparison
            .state()
            .value()
            .map(|comparison| blend_snapshots(&comparison.year1, &comparison.year2, self.blend))
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (b - a).mul_add(t, a)
}

/// Linear mix of two yearly snapshots; `percent` is clamped to 0..=100.
pub fn blend_snapshots(first: &YearSnapshot, second: &YearSnapshot, percent: u8) -> YearSnapshot {
    let t = f64::from(percent.min(100)) / 100.0;
    let year = if t < 0.5 { first.year } else { second.year };

    YearSnapshot {
        year,
        gdp_proxy_sol: lerp(first.gdp_proxy_sol, second.gdp_proxy_sol, t),
        urban_area_sqkm: lerp(first.urban_area_sqkm, second.urban_area_sqkm, t),
        mean_intensity: lerp(first.mean_intensity, second.mean_intensity, t),
        max_intensity: lerp(first.max_intensity, second.max_intensity, t),
        lit_pixels: lerp(first.lit_pixels, second.lit_pixels, t),
        dark_pixels: lerp(first.dark_pixels, second.dark_pixels, t),
        sector_breakdown: SectorBreakdown {
            rural: lerp(
                first.sector_breakdown.rural,
                second.sector_breakdown.rural,
                t,
            ),
            urban: lerp(
                first.sector_breakdown.urban,
                second.sector_breakdown.urban,
                t,
            ),
            industrial: lerp(
                first.sector_breakdown.industrial,
                second.sector_breakdown.industrial,
                t,
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(year: i32, sol: f64) -> YearSnapshot {
        YearSnapshot {
            year,
            gdp_proxy_sol: sol,
            mean_intensity: sol / 10.0,
            ..YearSnapshot::default()
        }
    }

    #[test]
    fn equal_years_are_rejected_locally() {
        let mut compare = CompareState::new(2020, 2020);
        assert!(compare.run().is_err());
        assert_eq!(compare.comparison.issued(), 0);
    }

    #[test]
    fn blend_endpoints_match_inputs() {
        let a = snapshot(2014, 100.0);
        let b = snapshot(2022, 300.0);
        assert_eq!(blend_snapshots(&a, &b, 0), a);
        assert_eq!(blend_snapshots(&a, &b, 100), b);

        let mid = blend_snapshots(&a, &b, 50);
        assert!((mid.gdp_proxy_sol - 200.0).abs() < 1e-9);
        assert_eq!(mid.year, 2022);
    }

    #[test]
    fn blend_slider_is_bounded() {
        let mut compare = CompareState::new(2014, 2022);
        for _ in 0..20 {
            compare.nudge_blend(true);
        }
        assert_eq!(compare.blend, 100);
        for _ in 0..20 {
            compare.nudge_blend(false);
        }
        assert_eq!(compare.blend, 0);
    }
}
