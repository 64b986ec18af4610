//! Zenn tools module.
//!
//! This module provides the listing tools backed by the Zenn public API:
//! - `article`: list articles, optionally by author or topic
//! - `book`: list books, same filters
//!
//! Each tool file declares its typed parameters (and thus its input
//! schema); `common` holds the shared query model and decoding helpers,
//! `client` the HTTP fetch adapter used by both.

pub mod article;
pub mod book;
pub mod client;
pub mod common;

pub use article::{ArticleParams, ArticleQuery, ArticleTool};
pub use book::{BookParams, BookQuery, BookTool};
pub use client::{ListingFetcher, ZennClient};
pub use common::{ListingQuery, QueryParams, ResourcePath, SortOrder, ToolKind};
