use crate::domain::LatLon;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use thiserror::Error;

/// A named place the map knows how to frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionEntry {
    /// Canonical lowercase name.
    pub key: &'static str,
    pub center: LatLon,
    pub zoom: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no region matches \"{0}\"")]
    NotFound(String),
}

const fn entry(key: &'static str, lat: f64, lon: f64, zoom: f64) -> RegionEntry {
    RegionEntry {
        key,
        center: LatLon::new(lat, lon),
        zoom,
    }
}

/// Static lookup table. Order matters: resolution picks the first match.
const REGIONS: &[RegionEntry] = &[
    entry("india", 20.5937, 78.9629, 4.5),
    entry("tamil nadu", 11.1271, 78.6569, 6.8),
    entry("jharkhand", 23.6102, 85.2799, 7.0),
    entry("maharashtra", 19.7515, 75.7139, 6.5),
    entry("karnataka", 15.3173, 75.7139, 6.8),
    entry("kerala", 10.8505, 76.2711, 7.0),
    entry("telangana", 18.1124, 79.0193, 7.0),
    entry("andhra pradesh", 15.9129, 79.74, 6.6),
    entry("gujarat", 22.2587, 71.1924, 6.6),
    entry("rajasthan", 27.0238, 74.2179, 6.2),
    entry("uttar pradesh", 26.8467, 80.9462, 6.3),
    entry("west bengal", 22.9868, 87.855, 6.8),
    entry("delhi", 28.7041, 77.1025, 9.0),
    entry("mumbai", 19.076, 72.8777, 9.5),
    entry("bangalore", 12.9716, 77.5946, 9.5),
    entry("chennai", 13.0827, 80.2707, 9.5),
    entry("united states", 37.0902, -95.7129, 3.5),
    entry("usa", 37.0902, -95.7129, 3.5),
    entry("indiana", 40.2672, -86.1349, 6.5),
    entry("california", 36.7783, -119.4179, 5.5),
    entry("texas", 31.9686, -99.9018, 5.5),
    entry("new york", 40.7128, -74.006, 8.0),
    entry("united kingdom", 55.3781, -3.436, 5.0),
    entry("uk", 55.3781, -3.436, 5.0),
    entry("china", 35.8617, 104.1954, 3.8),
    entry("japan", 36.2048, 138.2529, 4.8),
    entry("brazil", -14.235, -51.9253, 3.8),
    entry("nigeria", 9.082, 8.6753, 5.5),
    entry("egypt", 26.8206, 30.8025, 5.5),
    entry("australia", -25.2744, 133.7751, 3.8),
    entry("asia", 34.0479, 100.6197, 2.8),
    entry("europe", 54.526, 15.2551, 3.2),
    entry("africa", -8.7832, 34.5085, 2.8),
    entry("south america", -8.7832, -55.4915, 2.8),
];

/// Lowercased, trimmed form used for matching.
pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

#[derive(Debug, Clone)]
pub struct Gazetteer {
    entries: Vec<RegionEntry>,
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::new(REGIONS.to_vec())
    }
}

impl Gazetteer {
    pub const fn new(entries: Vec<RegionEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RegionEntry] {
        &self.entries
    }

    /// First entry whose key contains the query or is contained by it.
    ///
    /// Ties go to table order, not specificity: "indiana" resolves to "india".
    pub fn resolve(&self, query: &str) -> Result<&RegionEntry, ResolveError> {
        let needle = normalize(query);
        if needle.is_empty() {
            return Err(ResolveError::NotFound(needle));
        }

        self.entries
            .iter()
            .find(|entry| entry.key.contains(needle.as_str()) || needle.contains(entry.key))
            .ok_or(ResolveError::NotFound(needle))
    }

    /// Fuzzy-ranked autocomplete candidates. Never used for resolution.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&RegionEntry> {
        let needle = normalize(query);
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, usize, &RegionEntry)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                matcher
                    .fuzzy_match(entry.key, &needle)
                    .map(|score| (score, index, entry))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, _, entry)| entry)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tamil_nadu_resolves_to_its_entry() {
        let gazetteer = Gazetteer::default();
        let entry = gazetteer.resolve("Tamil Nadu").unwrap();
        assert_eq!(entry.key, "tamil nadu");
        assert_eq!(entry.center, LatLon::new(11.1271, 78.6569));
        assert!((entry.zoom - 6.8).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_and_unknown_queries_are_not_found() {
        let gazetteer = Gazetteer::default();
        assert!(gazetteer.resolve("").is_err());
        assert!(gazetteer.resolve("   ").is_err());
        assert_eq!(
            gazetteer.resolve("zzzz-nonexistent"),
            Err(ResolveError::NotFound("zzzz-nonexistent".to_string()))
        );
    }

    #[test]
    fn query_is_trimmed_and_case_folded() {
        let gazetteer = Gazetteer::default();
        assert_eq!(gazetteer.resolve("  KERALA ").unwrap().key, "kerala");
    }

    #[test]
    fn partial_query_matches_containing_key() {
        let gazetteer = Gazetteer::default();
        assert_eq!(gazetteer.resolve("jhark").unwrap().key, "jharkhand");
    }

    #[test]
    fn longer_query_matches_contained_key() {
        let gazetteer = Gazetteer::default();
        assert_eq!(gazetteer.resolve("greater mumbai area").unwrap().key, "mumbai");
    }

    #[test]
    fn ties_break_by_table_order_not_specificity() {
        let gazetteer = Gazetteer::default();
        assert_eq!(gazetteer.resolve("indiana").unwrap().key, "india");
    }

    #[test]
    fn resolution_returns_first_matching_entry() {
        let gazetteer = Gazetteer::new(vec![
            entry("alpha", 1.0, 1.0, 3.0),
            entry("alphabet", 2.0, 2.0, 4.0),
            entry("beta", 3.0, 3.0, 5.0),
        ]);
        for query in ["alp", "alpha", "ALPHABET soup"] {
            let needle = normalize(query);
            let expected = gazetteer
                .entries()
                .iter()
                .find(|e| e.key.contains(needle.as_str()) || needle.contains(e.key))
                .unwrap();
            assert_eq!(gazetteer.resolve(query).unwrap(), expected);
        }
        assert_eq!(gazetteer.resolve("alphabet").unwrap().key, "alpha");
    }

    #[test]
    fn suggestions_rank_fuzzy_matches() {
        let gazetteer = Gazetteer::default();
        let suggestions = gazetteer.suggest("tmlnd", 3);
        assert_eq!(suggestions.first().map(|e| e.key), Some("tamil nadu"));
        assert!(gazetteer.suggest("", 3).is_empty());
        assert!(gazetteer.suggest("kerala", 0).is_empty());
    }
}
