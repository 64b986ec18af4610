//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The static list of tool descriptors
//! - Name-based dispatch of tool calls to the listing fetcher
//! - Normalization of every failure into a `ToolExecutionError`

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use tracing::{debug, error, instrument, warn};

use super::definitions::{ArticleQuery, ArticleTool, BookQuery, BookTool, ListingFetcher};
use super::error::{ToolError, ToolExecutionError};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - owns the fetcher and routes calls by tool name.
///
/// Holds no mutable state, so one instance is shared by all concurrent calls.
pub struct ToolRegistry {
    server_name: String,
    fetcher: Arc<dyn ListingFetcher>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(server_name: impl Into<String>, fetcher: Arc<dyn ListingFetcher>) -> Self {
        Self {
            server_name: server_name.into(),
            fetcher,
        }
    }

    /// Get all tool names, in listing order.
    pub fn tool_names() -> Vec<&'static str> {
        vec![ArticleTool::NAME, BookTool::NAME]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![ArticleTool::to_tool(), BookTool::to_tool()]
    }

    /// Call a tool by name.
    ///
    /// On success the upstream JSON is returned as a single pretty-printed
    /// text item. Any failure is logged and normalized.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallToolResult, ToolExecutionError> {
        debug!(?arguments, "Calling tool: {}", name);

        match self.dispatch(name, &arguments).await {
            Ok(result) => Ok(result),
            Err(e) => {
                error!("Error processing {} query: {}", self.server_name, e);
                Err(ToolExecutionError::new(&self.server_name, name, &e))
            }
        }
    }

    async fn dispatch(
        &self,
        name: &str,
        arguments: &JsonObject,
    ) -> Result<CallToolResult, ToolError> {
        let (resource, params) = match name {
            ArticleTool::NAME => {
                let query = ArticleQuery::from_arguments(arguments)?;
                (ArticleTool::KIND.resource(), query.to_query_params())
            }
            BookTool::NAME => {
                let query = BookQuery::from_arguments(arguments)?;
                (BookTool::KIND.resource(), query.to_query_params())
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                return Err(ToolError::unknown_tool(name));
            }
        };

        let body = self.fetcher.fetch(resource, &params).await?;
        let text = serde_json::to_string_pretty(&body)?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ZennConfig;
    use crate::domains::tools::FetchError;
    use crate::domains::tools::definitions::{QueryParams, ResourcePath, ZennClient};
    use async_trait::async_trait;
    use rmcp::model::RawContent;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    /// Records every request and answers with a canned body.
    struct StubFetcher {
        response: Value,
        calls: Mutex<Vec<(ResourcePath, QueryParams)>>,
    }

    impl StubFetcher {
        fn new(response: Value) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(ResourcePath, QueryParams)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ListingFetcher for StubFetcher {
        async fn fetch(
            &self,
            resource: ResourcePath,
            params: &QueryParams,
        ) -> Result<Value, FetchError> {
            self.calls.lock().unwrap().push((resource, params.clone()));
            Ok(self.response.clone())
        }
    }

    /// Always answers with an upstream status error.
    struct FailingFetcher(u16);

    #[async_trait]
    impl ListingFetcher for FailingFetcher {
        async fn fetch(
            &self,
            resource: ResourcePath,
            _params: &QueryParams,
        ) -> Result<Value, FetchError> {
            Err(FetchError::http_status(
                self.0,
                format!("https://zenn.dev/api/{}", resource),
                "upstream unavailable",
            ))
        }
    }

    fn registry_with(fetcher: Arc<dyn ListingFetcher>) -> ToolRegistry {
        ToolRegistry::new("mcp-server-zenn", fetcher)
    }

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap_or_default()
    }

    fn text_of(result: &CallToolResult) -> &str {
        assert_eq!(result.content.len(), 1);
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn test_registry_tool_names() {
        assert_eq!(ToolRegistry::tool_names(), vec!["article", "book"]);
    }

    #[test]
    fn test_get_all_tools_is_stable() {
        for _ in 0..3 {
            let tools = ToolRegistry::get_all_tools();
            assert_eq!(tools.len(), 2);
            assert_eq!(tools[0].name, "article");
            assert_eq!(tools[1].name, "book");
        }
    }

    #[tokio::test]
    async fn test_call_article_with_defaults() {
        let stub = StubFetcher::new(json!({ "articles": [] }));
        let registry = registry_with(stub.clone());

        let result = registry.call_tool("article", JsonObject::new()).await.unwrap();
        assert_ne!(result.is_error, Some(true));

        let body: Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(body, json!({ "articles": [] }));

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        let (resource, params) = &calls[0];
        assert_eq!(*resource, ResourcePath::Articles);
        assert_eq!(
            *params,
            vec![
                ("order", "latest".to_string()),
                ("page", "1".to_string()),
                ("count", "48".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_call_book_routes_to_books() {
        let stub = StubFetcher::new(json!({ "books": [] }));
        let registry = registry_with(stub.clone());

        registry
            .call_tool("book", args(json!({ "username": "SomeUser", "order": "Oldest" })))
            .await
            .unwrap();

        let calls = stub.calls();
        let (resource, params) = &calls[0];
        assert_eq!(*resource, ResourcePath::Books);
        assert!(params.contains(&("username", "someuser".to_string())));
        assert!(params.contains(&("order", "oldest".to_string())));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_normalized() {
        let stub = StubFetcher::new(json!({}));
        let registry = registry_with(stub.clone());

        let err = registry
            .call_tool("unknown_tool", JsonObject::new())
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Unknown tool"));
        assert!(message.contains("unknown_tool"));
        assert_eq!(err.tool(), "unknown_tool");
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_tool_names_match_exactly() {
        let registry = registry_with(StubFetcher::new(json!({})));
        let err = registry.call_tool("Article", JsonObject::new()).await.unwrap_err();
        assert!(err.message().starts_with("Unknown tool"));
    }

    #[tokio::test]
    async fn test_numeric_strings_are_coerced() {
        let stub = StubFetcher::new(json!({ "articles": [] }));
        let registry = registry_with(stub.clone());

        registry
            .call_tool("article", args(json!({ "page": "2", "count": 10.0 })))
            .await
            .unwrap();

        let (_, params) = &stub.calls()[0];
        assert!(params.contains(&("page", "2".to_string())));
        assert!(params.contains(&("count", "10".to_string())));
    }

    #[tokio::test]
    async fn test_fractional_count_is_normalized() {
        let stub = StubFetcher::new(json!({}));
        let registry = registry_with(stub.clone());

        let err = registry
            .call_tool("article", args(json!({ "count": 1.5 })))
            .await
            .unwrap_err();

        assert!(err.message().starts_with("Invalid arguments"));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_bad_order_is_normalized() {
        let stub = StubFetcher::new(json!({}));
        let registry = registry_with(stub.clone());

        let err = registry
            .call_tool("book", args(json!({ "order": "bogus" })))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Invalid order value: bogus"));
        assert_eq!(err.tool(), "book");
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_http_status_is_normalized() {
        let registry = registry_with(Arc::new(FailingFetcher(503)));

        let err = registry.call_tool("article", JsonObject::new()).await.unwrap_err();

        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("upstream unavailable"));
    }

    #[tokio::test]
    async fn test_non_ascii_is_preserved() {
        let stub = StubFetcher::new(json!({ "articles": [{ "title": "日本語の記事" }] }));
        let registry = registry_with(stub);

        let result = registry.call_tool("article", JsonObject::new()).await.unwrap();
        let text = text_of(&result);

        assert!(text.contains("日本語の記事"));
        assert!(!text.contains("\\u"));
        assert!(text.contains("\n  \"articles\""));
    }

    #[tokio::test]
    async fn test_upstream_key_order_is_kept() {
        let stub = StubFetcher::new(json!({ "zeta": 1, "alpha": 2 }));
        let registry = registry_with(stub);

        let result = registry.call_tool("book", JsonObject::new()).await.unwrap();
        let text = text_of(&result);

        assert!(text.find("zeta").unwrap() < text.find("alpha").unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_independent() {
        let stub = StubFetcher::new(json!({ "ok": true }));
        let registry = Arc::new(registry_with(stub.clone()));

        let calls = (1..=8).map(|page| {
            let registry = registry.clone();
            async move {
                registry
                    .call_tool("article", args(json!({ "page": page })))
                    .await
            }
        });
        let results = futures::future::join_all(calls).await;

        assert!(results.iter().all(Result::is_ok));
        let mut pages: Vec<_> = stub
            .calls()
            .into_iter()
            .map(|(_, params)| params[1].1.clone())
            .collect();
        pages.sort_by_key(|p| p.parse::<u32>().unwrap());
        let expected: Vec<_> = (1..=8).map(|p: u32| p.to_string()).collect();
        assert_eq!(pages, expected);
    }

    #[tokio::test]
    async fn test_end_to_end_against_mock_server() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/articles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "articles": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ZennClient::new(&ZennConfig {
            base_url: format!("{}/api/", server.uri()),
            ..ZennConfig::default()
        });
        let registry = registry_with(Arc::new(client));

        let result = registry.call_tool("article", JsonObject::new()).await.unwrap();
        let body: Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(body, json!({ "articles": [] }));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.query(), Some("order=latest&page=1&count=48"));
    }
}
