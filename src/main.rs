//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration, builds the server and runs it
//! over the configured transport.

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use zenn_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);

    config.validate()?;

    info!("Starting {} v{}", config.server.name, config.server.version);
    if config.zenn.is_base_url_overridden() {
        info!("Zenn API base URL overridden: {}", config.zenn.base_url);
    }

    // The server and its registry are built here and handed to the transport.
    let server = McpServer::new(config.clone());

    info!("Server initialized");

    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// `level` is the baseline; `RUST_LOG` directives refine it. Logs go to
/// stderr because stdout belongs to the STDIO transport.
fn init_logging(level: &str) {
    let level: Level = level.parse().unwrap_or(Level::INFO);
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
