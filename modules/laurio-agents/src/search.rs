// Web search for the Scout stage.
//
// SearchProvider never fails: transport and API errors come back as text so
// the model can read them like any other result.

use std::sync::Arc;

use ai_client::{Tool, ToolDefinition};
use async_trait::async_trait;
use serde::Deserialize;
use tavily_client::TavilyClient;
use tracing::{info, warn};

use laurio_common::Config;

/// Result cap for every live search.
pub const MAX_RESULTS: u32 = 3;

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> String;
}

/// Pick the live or mock provider depending on whether a Tavily key is set.
pub fn from_config(config: &Config) -> Arc<dyn SearchProvider> {
    match config.tavily_api_key {
        Some(ref key) => Arc::new(TavilySearch::new(TavilyClient::new(key.clone()))),
        None => Arc::new(MockSearch),
    }
}

// --- Tavily ---

pub struct TavilySearch {
    client: TavilyClient,
}

impl TavilySearch {
    pub fn new(client: TavilyClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchProvider for TavilySearch {
    async fn search(&self, query: &str) -> String {
        match self.client.search(query, MAX_RESULTS).await {
            Ok(results) => {
                info!(query, count = results.len(), "Tavily search complete");
                results
                    .iter()
                    .map(|r| format!("- {}: {} ({})", r.title, r.content, r.url))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Err(e) => {
                warn!(query, error = %e, "Tavily search failed");
                format!("Error performing search: {e}")
            }
        }
    }
}

// --- Mock ---

/// Canned results used when no search credential is configured.
pub struct MockSearch;

#[async_trait]
impl SearchProvider for MockSearch {
    async fn search(&self, query: &str) -> String {
        info!(query, "Mock search");
        format!(
            "Mock search results for '{query}':\n\
             1. AI is transforming entry-level jobs.\n\
             2. Soft skills are crucial for 2025.\n\
             3. Remote work is here to stay."
        )
    }
}

// --- Tool adapter ---

/// Exposes a [`SearchProvider`] to the model as `search_tool`.
pub struct SearchTool {
    provider: Arc<dyn SearchProvider>,
}

impl SearchTool {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchArgs {
    pub query: String,
}

#[async_trait]
impl Tool for SearchTool {
    const NAME: &'static str = "search_tool";
    type Error = std::convert::Infallible;
    type Args = SearchArgs;
    type Output = String;

    async fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Searches the web for the given query and returns up to three results \
                          as '- title: content (url)' lines."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Search query" }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: SearchArgs) -> Result<String, Self::Error> {
        Ok(self.provider.search(&args.query).await)
    }
}
