use crate::api::models::InsightItem;
use crate::api::ExplorerBackend;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub text: String,
    pub source: Option<String>,
    pub url: Option<String>,
}

impl From<InsightItem> for Insight {
    fn from(item: InsightItem) -> Self {
        match item {
            InsightItem::Text(text) => Self {
                text,
                source: None,
                url: None,
            },
            InsightItem::Detailed { text, source, url } => Self {
                text,
                source: source.filter(|s| !s.is_empty()),
                url: url.filter(|u| !u.is_empty()),
            },
        }
    }
}

/// Display name for a region key: a few aliases, title case otherwise.
pub fn normalize_region_name(region: &str) -> String {
    let lowered = region.trim().to_lowercase();
    match lowered.as_str() {
        "usa" | "united states" => "United States".to_string(),
        "uk" | "united kingdom" => "United Kingdom".to_string(),
        _ => lowered
            .split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            })
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Locally generated insights. Deterministic in `(region, year)` and never empty.
pub fn fallback_insights(region: &str, year: i32) -> Vec<Insight> {
    let name = normalize_region_name(region);
    let name = if name.is_empty() {
        "This region".to_string()
    } else {
        name
    };

    [
        format!(
            "{name} experienced economic and infrastructure development in {year}, contributing to increased nightlights activity."
        ),
        format!(
            "Urban expansion and industrial growth in {name} during {year} are reflected in the nightlights data patterns."
        ),
        format!(
            "The nightlights growth in {name} for {year} indicates increased economic activity and urbanization trends."
        ),
    ]
    .into_iter()
    .map(|text| Insight {
        text,
        source: Some("Analysis".to_string()),
        url: None,
    })
    .collect()
}

/// Fetch insights for a region and year, falling back to local text.
///
/// Always hits the backend; there is no cache. Cannot fail.
pub async fn load_insights(
    backend: &dyn ExplorerBackend,
    region: &str,
    year: i32,
    max_results: u32,
) -> Vec<Insight> {
    match backend.insights(region, year, max_results).await {
        Ok(items) if !items.is_empty() => {
            info!(region, year, count = items.len(), "insights loaded");
            items.into_iter().map(Insight::from).collect()
        }
        Ok(_) => {
            info!(region, year, "backend returned no insights, using fallback");
            fallback_insights(region, year)
        }
        Err(e) => {
            warn!(region, year, error = %e, "insights request failed, using fallback");
            fallback_insights(region, year)
        }
    }
}
