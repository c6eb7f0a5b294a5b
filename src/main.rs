//! TRENDBOARD: daily fixture trends with a bet of the day.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! previews today's board and serves the dashboard until Ctrl-C.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use trendboard::config::{self, AppConfig};
use trendboard::dashboard::{self, routes::DashboardState};
use trendboard::data::{FixtureSource, JsonFileSource};
use trendboard::engine::build_board;
use trendboard::strategy::BetSelector;

const BANNER: &str = r#"
 _____ ____  _____ _   _ ____  ____   ___    _    ____  ____
|_   _|  _ \| ____| \ | |  _ \| __ ) / _ \  / \  |  _ \|  _ \
  | | | |_) |  _| |  \| | | | |  _ \| | | |/ _ \ | |_) | | | |
  | | |  _ <| |___| |\  | |_| | |_) | |_| / ___ \|  _ <| |_| |
  |_| |_| \_\_____|_| \_|____/|____/ \___/_/   \_\_| \_\____/

  Daily trends and the bet of the day
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    // Load configuration from TOML, then environment overrides
    let config_path =
        std::env::var(config::CONFIG_PATH_ENV).unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    let mut cfg = AppConfig::load_or_default(&config_path)?;
    cfg.apply_overrides(|key| std::env::var(key).ok())?;

    println!("{BANNER}");
    info!(
        config = %config_path,
        data_file = %cfg.data.path,
        host = %cfg.dashboard.host,
        port = cfg.dashboard.port,
        combo_band = %format!("[{}, {}]", cfg.selector.combo_min_odds, cfg.selector.combo_max_odds),
        product_window = %format!("({}, {}]", cfg.selector.min_product, cfg.selector.max_product),
        "TRENDBOARD starting up"
    );

    // -- Initialise components -------------------------------------------

    let source: Arc<dyn FixtureSource> = Arc::new(JsonFileSource::new(&cfg.data.path));
    let selector = BetSelector::new(cfg.selector.clone());

    // Startup preview; a bad file is reported but does not stop the server.
    let today = chrono::Local::now().date_naive();
    match build_board(source.as_ref(), &selector, None, today) {
        Ok(board) => info!(
            date = %board.selected_date,
            dates = board.available_dates.len(),
            fixtures = board.fixtures.len(),
            bet = %board.bet,
            "Initial board"
        ),
        Err(e) => warn!(error = %e, "Initial board unavailable; requests will retry the data file"),
    }

    let state = Arc::new(DashboardState::new(source, selector, cfg.presentation.clone()));
    let addr = format!("{}:{}", cfg.dashboard.host, cfg.dashboard.port);

    dashboard::serve(state, &addr, &cfg.dashboard.assets_dir, shutdown_signal()).await?;

    info!("TRENDBOARD shut down cleanly.");
    Ok(())
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received.");
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("trendboard=info"));

    let json_logging = std::env::var("TRENDBOARD_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
