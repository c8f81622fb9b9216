//! Arby-X Live Collector
//!
//! Polls the Arby-X API for live route comparisons, reconciles each
//! snapshot against the session state and logs the resulting ticker.

use anyhow::Result;
use tokio::time::Duration;
use tracing::{info, warn};

use arby_live_core::{config::Config, feed::LiveFeed, http::HttpSnapshotSource};

mod logging;
mod runner;
mod ticker;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    logging::setup(&config.log_level);

    info!("Starting Arby-X live collector");
    config.validate()?;
    info!("Configuration loaded");
    info!("  API URL: {}", config.api_url);
    info!("  Poll interval: {}ms", config.poll_interval_ms);
    info!("  Stale threshold: {}s", config.stale_threshold_seconds);
    info!("  Highlight duration: {}s", config.highlight_duration_seconds);

    let source = HttpSnapshotSource::from_config(&config)?;
    let mut feed = LiveFeed::new(source, config.engine());

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };
    runner::run(
        &mut feed,
        Duration::from_millis(config.poll_interval_ms),
        shutdown,
    )
    .await;

    info!(
        "Session ended with {} cached routes, {} failed polls",
        feed.engine().state().cached_keys(),
        feed.failed_polls()
    );
    Ok(())
}
