use serde::{Deserialize, Serialize};

/// Geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Login,
    Dashboard,
    Analysis,
    Compare,
    About,
}

impl Page {
    /// Pages reachable from the navbar, in display order.
    pub const NAV: [Self; 5] = [
        Self::Home,
        Self::Dashboard,
        Self::Analysis,
        Self::Compare,
        Self::About,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Analysis => "/analysis",
            Self::Compare => "/compare",
            Self::About => "/about",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Home),
            1 => Some(Self::Dashboard),
            2 => Some(Self::Analysis),
            3 => Some(Self::Compare),
            4 => Some(Self::About),
            _ => None,
        }
    }

    pub fn nav_index(self) -> Option<usize> {
        Self::NAV.iter().position(|page| *page == self)
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().trim_start_matches('/').to_lowercase().as_str() {
            "" | "home" => Some(Self::Home),
            "login" => Some(Self::Login),
            "dashboard" => Some(Self::Dashboard),
            "analysis" => Some(Self::Analysis),
            "compare" => Some(Self::Compare),
            "about" => Some(Self::About),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Login",
            Self::Dashboard => "Dashboard",
            Self::Analysis => "Analysis",
            Self::Compare => "Compare",
            Self::About => "About",
        }
    }

    /// Pages that require an authenticated session.
    pub const fn is_protected(self) -> bool {
        matches!(self, Self::Dashboard | Self::Analysis | Self::Compare)
    }
}

/// First year of the VIIRS annual composites.
pub const FIRST_DATA_YEAR: i32 = 2012;

/// Sorted, de-duplicated years a slider can move through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearRange {
    years: Vec<i32>,
}

impl YearRange {
    /// Every year from the first composite up to `last`.
    pub fn fallback(last: i32) -> Self {
        Self {
            years: (FIRST_DATA_YEAR..=last.max(FIRST_DATA_YEAR)).collect(),
        }
    }

    /// `None` when the backend reported no years.
    pub fn from_available(mut years: Vec<i32>) -> Option<Self> {
        years.sort_unstable();
        years.dedup();
        if years.is_empty() {
            None
        } else {
            Some(Self { years })
        }
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn first(&self) -> i32 {
        self.years.first().copied().unwrap_or(FIRST_DATA_YEAR)
    }

    pub fn last(&self) -> i32 {
        self.years.last().copied().unwrap_or(FIRST_DATA_YEAR)
    }

    /// Closest year in the range; ties go to the earlier year.
    pub fn clamp(&self, year: i32) -> i32 {
        self.years
            .iter()
            .copied()
            .min_by_key(|candidate| candidate.abs_diff(year))
            .unwrap_or(year)
    }

    /// Move `steps` positions from `year`, stopping at either end.
    pub fn step(&self, year: i32, steps: i32) -> i32 {
        let anchor = self.clamp(year);
        let Some(index) = self.years.iter().position(|y| *y == anchor) else {
            return year;
        };
        let last = self.years.len().saturating_sub(1);
        let target = if steps.is_negative() {
            index.saturating_sub(steps.unsigned_abs() as usize)
        } else {
            (index + steps.unsigned_abs() as usize).min(last)
        };
        self.years[target]
    }

    /// Position of `year` within the range, from 0.0 to 1.0.
    pub fn ratio(&self, year: i32) -> f64 {
        let span = self.last() - self.first();
        if span <= 0 {
            return 1.0;
        }
        f64::from(self.clamp(year) - self.first()) / f64::from(span)
    }
}
