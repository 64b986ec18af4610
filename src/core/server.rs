//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tool registry.
//!
//! The server exposes tools only: prompt and resource listings are always
//! empty. Tool metadata and dispatch live in `domains/tools/registry.rs`,
//! so adding a tool does not require modifying this file.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::{Error, Result};
use crate::domains::tools::{
    ToolRegistry,
    definitions::{ListingFetcher, ZennClient},
};

/// The main MCP server handler.
///
/// Built once by the entry point and cloned cheaply into each transport
/// connection; all shared state sits behind `Arc`.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool registry for handling tool calls.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server talking to the configured Zenn API.
    pub fn new(config: Config) -> Self {
        let fetcher = Arc::new(ZennClient::new(&config.zenn));
        Self::with_fetcher(config, fetcher)
    }

    /// Create a server backed by an arbitrary listing fetcher.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn ListingFetcher>) -> Self {
        let registry = Arc::new(ToolRegistry::new(config.server.name.clone(), fetcher));

        Self {
            config: Arc::new(config),
            registry,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// List all available tools.
    pub fn list_tools(&self) -> Vec<Tool> {
        ToolRegistry::get_all_tools()
    }

    /// List all available prompts (there are none).
    pub fn list_prompts(&self) -> Vec<Prompt> {
        Vec::new()
    }

    /// List all available resources (there are none).
    pub fn list_resources(&self) -> Vec<Resource> {
        Vec::new()
    }

    /// Call a tool by name.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult> {
        self.registry
            .call_tool(name, arguments.unwrap_or_default())
            .await
            .map_err(Error::from)
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "Query Zenn (zenn.dev) listings. Use the `article` tool for articles and the \
                 `book` tool for books; both accept optional username, topicname, order \
                 (latest|oldest), page and count."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: McpServer::list_tools(self),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);
        match McpServer::call_tool(self, &request.name, request.arguments).await {
            Ok(result) => Ok(result),
            // Reported as a failed tool result so the model can see the message.
            Err(Error::Tool(e)) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        Ok(ListResourcesResult {
            resources: McpServer::list_resources(self),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListPromptsResult, McpError> {
        info!("Listing prompts");
        Ok(ListPromptsResult {
            prompts: McpServer::list_prompts(self),
            next_cursor: None,
            meta: None,
        })
    }
}
