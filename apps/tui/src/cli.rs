use crate::domain::Page;
use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(name = "quatsch", version, about = "Night-lights explorer for the terminal")]
pub struct CliArgs {
    /// Print a region summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the backend base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Override the log file path
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,

    /// Region for the headless summary
    #[arg(long, value_name = "NAME", default_value = "india")]
    pub region: String,

    /// Year for the headless summary
    #[arg(long, value_name = "YEAR")]
    pub year: Option<i32>,

    /// Page to open on start (home, dashboard, analysis, compare, about, login)
    #[arg(long, value_name = "PAGE", value_parser = parse_page)]
    pub page: Option<Page>,
}

fn parse_page(value: &str) -> Result<Page, String> {
    Page::parse(value).ok_or_else(|| format!("unknown page \"{value}\""))
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("API_BASE_URL", url);
        }
        if let Some(secs) = self.timeout {
            std::env::set_var("REQUEST_TIMEOUT_SECS", secs.to_string());
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("LOG_FILE", path);
        }
        if let Some(year) = self.year {
            std::env::set_var("DEFAULT_YEAR", year.to_string());
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headless_flags() {
        let args = CliArgs::parse_from([
            "quatsch",
            "--headless",
            "--json",
            "--region",
            "tamil nadu",
            "--year",
            "2020",
        ]);
        assert!(args.headless);
        assert!(args.json);
        assert_eq!(args.region, "tamil nadu");
        assert_eq!(args.year, Some(2020));
    }

    #[test]
    fn start_page_accepts_routes() {
        let args = CliArgs::parse_from(["quatsch", "--page", "/compare"]);
        assert_eq!(args.page, Some(Page::Compare));
        assert!(CliArgs::try_parse_from(["quatsch", "--page", "nowhere"]).is_err());
    }

    #[test]
    fn help_mentions_api_url() {
        assert!(CliArgs::help_text().contains("--api-url"));
    }
}
