//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use crate::domains::tools::definitions::ZennClient;
use serde::{Deserialize, Serialize};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Upstream Zenn API configuration.
    pub zenn: ZennConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for the upstream listing API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZennConfig {
    /// API root; resource segments are appended to it.
    pub base_url: String,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl ZennConfig {
    /// Whether the base URL points somewhere other than the public API.
    pub fn is_base_url_overridden(&self) -> bool {
        self.base_url != ZennClient::DEFAULT_BASE_URL
    }
}

impl Default for ZennConfig {
    fn default() -> Self {
        Self {
            base_url: ZennClient::DEFAULT_BASE_URL.to_string(),
            user_agent: format!("{}/{}", DEFAULT_SERVER_NAME, env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Name reported to clients unless overridden.
pub const DEFAULT_SERVER_NAME: &str = "mcp-server-zenn";

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: DEFAULT_SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            zenn: ZennConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_ZENN_BASE_URL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(base_url) = std::env::var("MCP_ZENN_BASE_URL") {
            config.zenn.base_url = base_url;
        }

        if let Ok(user_agent) = std::env::var("MCP_ZENN_USER_AGENT") {
            config.zenn.user_agent = user_agent;
        }

        config
    }

    /// Reject settings the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.server.name.trim().is_empty() {
            return Err(Error::config("server name must not be empty"));
        }

        let base_url = self.zenn.base_url.trim();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(Error::config(format!(
                "Zenn base URL must be an http(s) URL, got '{}'",
                self.zenn.base_url
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.name, "mcp-server-zenn");
        assert_eq!(config.server.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.zenn.base_url, "https://zenn.dev/api/");
        assert!(config.zenn.user_agent.starts_with("mcp-server-zenn/"));
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.zenn.base_url = "zenn.dev/api".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("zenn.dev/api"));

        let mut config = Config::default();
        config.server.name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zenn_overrides_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_ZENN_BASE_URL", "http://localhost:8080/api");
            std::env::set_var("MCP_ZENN_USER_AGENT", "custom-agent");
        }
        let config = Config::from_env();
        assert_eq!(config.zenn.base_url, "http://localhost:8080/api");
        assert_eq!(config.zenn.user_agent, "custom-agent");
        assert!(config.zenn.is_base_url_overridden());
        unsafe {
            std::env::remove_var("MCP_ZENN_BASE_URL");
            std::env::remove_var("MCP_ZENN_USER_AGENT");
        }
    }

    #[test]
    fn test_server_name_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_SERVER_NAME", "zenn-test");
        }
        let config = Config::from_env();
        assert_eq!(config.server.name, "zenn-test");
        unsafe {
            std::env::remove_var("MCP_SERVER_NAME");
        }
    }

    #[test]
    fn test_zenn_defaults_without_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("MCP_ZENN_BASE_URL");
            std::env::remove_var("MCP_ZENN_USER_AGENT");
        }
        let config = Config::from_env();
        assert_eq!(config.zenn.base_url, ZennConfig::default().base_url);
        assert!(!config.zenn.is_base_url_overridden());
    }
}
