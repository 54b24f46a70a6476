//! Google Play Console MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server that lets an
//! agent manage Android apps on the Google Play Console through the Android
//! Publisher API.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling, and the main server
//! - **domains**: Business logic organized by bounded contexts
//!   - **publisher**: Service-account auth, the API client and edit sessions
//!   - **tools**: MCP tools that can be executed by clients
//!
//! # Example
//!
//! ```rust,no_run
//! use play_console_mcp_server::core::{Config, McpServer, TransportService};
//! use play_console_mcp_server::domains::tools::ToolDispatcher;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env().with_key_file("service-account.json");
//!     config.validate()?;
//!     let dispatcher = ToolDispatcher::from_config(&config)?;
//!     let server = McpServer::new(config.clone(), dispatcher);
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
