use chrono::Datelike;
use crate::domain::FIRST_DATA_YEAR;
use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SAMPLE_RATE: u32 = 10;
const DEFAULT_MAX_INSIGHTS: u32 = 5;
const DEFAULT_LOG_FILE: &str = "quatsch.log";

/// Runtime settings resolved from `.env`, the environment and CLI overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub sample_rate: u32,
    pub max_insights: u32,
    pub default_year: i32,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_insights: DEFAULT_MAX_INSIGHTS,
            default_year: last_year(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

/// Most recent year with a complete annual composite.
fn last_year() -> i32 {
    chrono::Local::now().year() - 1
}

/// Initializes the application configuration
pub fn init_app_config() -> Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    parse_config(|key| env::var(key).ok())
}

/// Builds the configuration from a key lookup.
pub fn parse_config(lookup: impl Fn(&str) -> Option<String>) -> Result<AppConfig> {
    let defaults = AppConfig::default();

    let api_base_url = lookup("API_BASE_URL")
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .unwrap_or(defaults.api_base_url);
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
        return Err(eyre!(
            "API_BASE_URL must start with http:// or https://, got \"{api_base_url}\""
        ));
    }

    let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                return Err(eyre!(
                    "REQUEST_TIMEOUT_SECS must be a positive integer, got \"{raw}\""
                ))
            }
        },
        None => defaults.request_timeout,
    };

    // Out-of-range values fall back the same way the backend does
    let sample_rate = lookup("SAMPLE_RATE")
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|rate| (1..=100).contains(rate))
        .unwrap_or(DEFAULT_SAMPLE_RATE);

    let max_insights = lookup("MAX_INSIGHTS")
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|max| (1..=10).contains(max))
        .unwrap_or(DEFAULT_MAX_INSIGHTS);

    let default_year = match lookup("DEFAULT_YEAR") {
        Some(raw) => {
            let latest = last_year() + 2;
            match raw.trim().parse::<i32>() {
                Ok(year) if (FIRST_DATA_YEAR..=latest).contains(&year) => year,
                _ => {
                    return Err(eyre!(
                        "DEFAULT_YEAR must be a year between {FIRST_DATA_YEAR} and {latest}, got \"{raw}\""
                    ))
                }
            }
        }
        None => defaults.default_year,
    };

    let log_file = lookup("LOG_FILE").map_or(defaults.log_file, PathBuf::from);

    Ok(AppConfig {
        api_base_url,
        request_timeout,
        sample_rate,
        max_insights,
        default_year,
        log_file,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = parse_config(lookup_from(&[])).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.sample_rate, 10);
        assert_eq!(config.max_insights, 5);
        assert_eq!(config.default_year, last_year());
    }

    #[test]
    fn out_of_range_values_fall_back() {
        let config =
            parse_config(lookup_from(&[("SAMPLE_RATE", "500"), ("MAX_INSIGHTS", "0")])).unwrap();
        assert_eq!(config.sample_rate, 10);
        assert_eq!(config.max_insights, 5);
    }

    #[test]
    fn overrides_are_read() {
        let config = parse_config(lookup_from(&[
            ("API_BASE_URL", "https://nightlights.example.org/"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("DEFAULT_YEAR", "2020"),
            ("LOG_FILE", "/tmp/q.log"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://nightlights.example.org");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.default_year, 2020);
        assert_eq!(config.log_file, PathBuf::from("/tmp/q.log"));
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(parse_config(lookup_from(&[("API_BASE_URL", "localhost:5000")])).is_err());
        assert!(parse_config(lookup_from(&[("REQUEST_TIMEOUT_SECS", "soon")])).is_err());
        assert!(parse_config(lookup_from(&[("REQUEST_TIMEOUT_SECS", "0")])).is_err());
        assert!(parse_config(lookup_from(&[("DEFAULT_YEAR", "last")])).is_err());
        assert!(parse_config(lookup_from(&[("DEFAULT_YEAR", "-2147483648")])).is_err());
        assert!(parse_config(lookup_from(&[("DEFAULT_YEAR", "2011")])).is_err());
        assert!(parse_config(lookup_from(&[("DEFAULT_YEAR", "2147483647")])).is_err());
    }
}
