use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use islandora_bridge::AppState;
use islandora_bridge::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let flags = xflags::parse_or_exit! {
        /// Path to the TOML configuration file
        optional -c,--config path: PathBuf
        /// Port to listen on, overrides [server] http_port
        optional -p,--port port: u16
    };

    let mut config = Config::load(flags.config.as_deref())?;
    if let Some(port) = flags.port {
        config.server.http_port = port;
    }
    info!(
        target: "lifecycle",
        fedora = %config.fedora.base_uri,
        triplestore = %config.triplestore.endpoint,
        "starting"
    );

    let state = AppState::from_config(&config)?;
    islandora_bridge::http::serve(&config, state).await?;

    info!(target: "lifecycle", "stopped");
    Ok(())
}
