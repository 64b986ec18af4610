//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type covering the tool layer, the
//! transport layer and external dependencies.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// A tool call failed.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolExecutionError),

    /// The transport could not be started or failed while serving.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
