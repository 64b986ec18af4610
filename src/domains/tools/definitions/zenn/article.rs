//! Zenn article listing tool.
//!
//! Fetches the article listing, optionally filtered by author or topic.

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{
    ListingQuery, QueryParams, SortOrder, ToolKind, default_count, default_order, default_page,
    deserialize_lenient_integer, parse_params,
};
use crate::domains::tools::ValidationError;

/// Parameters of the `article` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ArticleParams {
    #[schemars(description = "Username of the article author")]
    #[serde(default)]
    pub username: Option<String>,

    #[schemars(description = "Topic name of the article")]
    #[serde(default)]
    pub topicname: Option<String>,

    /// Parsed case-insensitively into a [`SortOrder`].
    #[schemars(
        with = "SortOrder",
        description = "Order of the articles. Choose from latest or oldest. Default: latest"
    )]
    #[serde(default = "default_order")]
    pub order: Option<String>,

    #[schemars(with = "u32", description = "Page number of the articles. Default: 1")]
    #[serde(default = "default_page", deserialize_with = "deserialize_lenient_integer")]
    pub page: Option<i64>,

    #[schemars(with = "u32", description = "Number of articles per page. Default: 48")]
    #[serde(default = "default_count", deserialize_with = "deserialize_lenient_integer")]
    pub count: Option<i64>,
}

/// Validated arguments of the `article` tool.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleQuery(ListingQuery);

impl TryFrom<ArticleParams> for ArticleQuery {
    type Error = ValidationError;

    fn try_from(params: ArticleParams) -> Result<Self, Self::Error> {
        ListingQuery::new(
            params.username,
            params.topicname,
            params.order.as_deref(),
            params.page,
            params.count,
        )
        .map(Self)
    }
}

impl ArticleQuery {
    /// Build from raw tool arguments, applying defaults.
    pub fn from_arguments(arguments: &JsonObject) -> Result<Self, ValidationError> {
        parse_params::<ArticleParams>(arguments)?.try_into()
    }

    pub fn username(&self) -> Option<&str> {
        self.0.username()
    }

    pub fn topicname(&self) -> Option<&str> {
        self.0.topicname()
    }

    pub fn order(&self) -> SortOrder {
        self.0.order()
    }

    pub fn page(&self) -> u32 {
        self.0.page()
    }

    pub fn count(&self) -> u32 {
        self.0.count()
    }

    pub fn to_query_params(&self) -> QueryParams {
        self.0.to_query_params()
    }
}

/// Zenn Article Listing Tool implementation.
#[derive(Debug, Clone)]
pub struct ArticleTool;

impl ArticleTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "article";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Fetch articles from Zenn.dev";

    pub const KIND: ToolKind = ToolKind::Article;

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ArticleParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
