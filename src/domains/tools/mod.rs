//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Tool descriptors and name-based dispatch
//! - `error.rs` - Validation, fetch and dispatch error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/zenn/` (e.g., `scrap.rs`)
//! 2. Define its query type and `to_tool()`
//! 3. Export in `definitions/mod.rs`
//! 4. Add it to `get_all_tools()` and the dispatch `match` in `registry.rs`

pub mod definitions;
mod error;
mod registry;

pub use error::{FetchError, ToolError, ToolExecutionError, ValidationError};
pub use registry::ToolRegistry;
