//! Zenn MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server that lets an
//! assistant query the article and book listings of Zenn (zenn.dev).
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and
//!   the transport layer
//! - **domains**: business logic
//!   - **tools**: the `article` and `book` tools, their query models, the
//!     upstream HTTP client and the dispatching registry
//!
//! # Example
//!
//! ```rust,no_run
//! use zenn_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     config.validate()?;
//!     let server = McpServer::new(config.clone());
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
