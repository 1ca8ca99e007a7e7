use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use quatsch_tui::api::{ApiClient, ExplorerBackend};
use quatsch_tui::cli::CliArgs;
use quatsch_tui::{config, event, logging, terminal, App};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = config::init_app_config()?;
    logging::init(&config.log_file, args.debug)?;
    info!(api = %config.api_base_url, year = config.default_year, "starting quatsch");

    let client = ApiClient::new(&config.api_base_url, config.request_timeout)
        .wrap_err("Failed to build HTTP client")?;
    let backend: Arc<dyn ExplorerBackend> = Arc::new(client);

    // Check if we're running in a terminal
    if args.headless || !is_terminal() {
        return event::run_headless(backend.as_ref(), &config, &args.region, args.json).await;
    }

    let mut app = App::new(config, backend);
    app.start();
    if let Some(page) = args.page {
        app.navigate(page);
    }

    // Setup terminal
    let mut terminal = terminal::setup()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app).await;
    if let Err(e) = &result {
        error!(error = %e, "event loop failed");
    }

    // Restore terminal
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
