pub mod dashboard;
pub mod error;
pub mod models;
pub mod modules;
pub mod proxy;
mod utils;

use modules::logger;
use tracing::{info, warn};

/// Start the relay and dashboard server, run until Ctrl-C
pub async fn run() -> anyhow::Result<()> {
    let config = modules::load_app_config()?;
    // Flushes the log file when dropped at the end of run
    let _log_guard = logger::init_logger(&config);

    let path = modules::config_path()?;
    if !path.exists() {
        // Write defaults so the file can be edited
        modules::save_app_config(&config)?;
        info!("Wrote default config to {}", path.display());
    }

    if config.proxy.api_key.is_none() {
        warn!(
            "{} is not set, relay requests will fail until it is provided",
            modules::config::API_KEY_ENV
        );
    }

    let (server, handle) = proxy::AxumServer::start(&config.proxy)
        .await
        .map_err(anyhow::Error::msg)?;
    info!("Dashboard available at http://{}/", server.local_addr());

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");
    server.stop();
    handle.await?;
    Ok(())
}
