//! Tool-specific error types.

use thiserror::Error;

/// Longest upstream body excerpt kept in an HTTP status error.
const MAX_BODY_EXCERPT: usize = 512;

/// Malformed tool arguments or enumeration strings.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Unrecognized tool kind string.
    #[error("Invalid tool value: {0}")]
    InvalidToolKind(String),

    /// Unrecognized upstream resource string.
    #[error("Invalid resource value: {0}")]
    InvalidResource(String),

    /// Unrecognized sort order.
    #[error("Invalid order value: {0}")]
    InvalidOrder(String),

    /// A known field carried an unusable value.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// The argument object itself could not be decoded (e.g. unknown fields).
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl ValidationError {
    /// Create a new "invalid field" error.
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Failures of the outbound HTTP call.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Upstream answered with a non-2xx status.
    #[error("HTTP status {status} from {url}: {body}")]
    HttpStatus {
        status: u16,
        url: String,
        body: String,
    },

    /// The request never produced a response.
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not valid JSON.
    #[error("Invalid JSON response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Create an HTTP status error, keeping only the head of the body.
    pub fn http_status(status: u16, url: impl Into<String>, body: &str) -> Self {
        let body = match body.char_indices().nth(MAX_BODY_EXCERPT) {
            Some((cut, _)) => format!("{}...", &body[..cut]),
            None => body.to_string(),
        };

        Self::HttpStatus {
            status,
            url: url.into(),
            body,
        }
    }

    /// Upstream status code, if the failure was a status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors that can occur while dispatching a single tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Invalid arguments were provided to the tool.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The upstream call failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The upstream payload could not be rendered as text.
    #[error("Failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }
}

/// The single failure type surfaced to the protocol layer.
///
/// Whatever went wrong inside a call, callers only ever see this, carrying
/// the tool name and the original message text.
#[derive(Debug, Error)]
#[error("Error processing {server} query with tool '{tool}': {message}")]
pub struct ToolExecutionError {
    server: String,
    tool: String,
    message: String,
}

impl ToolExecutionError {
    pub fn new(server: impl Into<String>, tool: impl Into<String>, source: &ToolError) -> Self {
        Self {
            server: server.into(),
            tool: tool.into(),
            message: source.to_string(),
        }
    }

    /// Name of the tool that was invoked.
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Message of the underlying failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}
