//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod zenn;

pub use zenn::{
    ArticleParams, ArticleQuery, ArticleTool, BookParams, BookQuery, BookTool, ListingFetcher,
    ListingQuery, QueryParams, ResourcePath, SortOrder, ToolKind, ZennClient,
};
