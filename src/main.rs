//! MCP Server Entry Point
//!
//! Parses the command line, loads configuration, initializes logging and
//! starts the server with the configured transport.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use play_console_mcp_server::core::{Config, McpServer, TransportService};
use play_console_mcp_server::domains::tools::{ToolDispatcher, ToolRegistry};

/// MCP server for the Google Play Console.
#[derive(Debug, Parser)]
#[command(name = "play-console-mcp-server", version, about)]
struct Cli {
    /// Path to the service-account JSON key file.
    ///
    /// Overrides MCP_PLAY_KEY_FILE and GOOGLE_APPLICATION_CREDENTIALS.
    #[arg(long, value_name = "PATH")]
    key_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides MCP_LOG_LEVEL.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Print the available tools and exit.
    #[arg(long)]
    list_tools: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_tools {
        for tool in ToolRegistry::get_all_tools() {
            println!("{:<16} {}", tool.name, tool.description.unwrap_or_default());
        }
        return Ok(());
    }

    // Environment first, command line on top
    let mut config = Config::from_env();
    if let Some(key_file) = cli.key_file {
        config = config.with_key_file(key_file);
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    config.validate().context("invalid configuration")?;
    let dispatcher =
        ToolDispatcher::from_config(&config).context("cannot load service account credentials")?;

    let server = McpServer::new(config.clone(), dispatcher);

    info!("Server initialized");

    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout carries the MCP stream.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
