pub mod error;
pub mod types;

pub use error::{Result, TavilyError};
pub use types::{SearchDepth, SearchRequest, SearchResponse, SearchResult};

const BASE_URL: &str = "https://api.tavily.com";

pub struct TavilyClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TavilyClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Basic-depth search capped at `max_results`.
    pub async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchResult>> {
        let request = SearchRequest {
            query: query.to_string(),
            search_depth: SearchDepth::Basic,
            max_results,
        };
        Ok(self.execute(&request).await?.results)
    }

    pub async fn execute(&self, request: &SearchRequest) -> Result<SearchResponse> {
        tracing::debug!(query = %request.query, max_results = request.max_results, "Tavily search");

        let url = format!("{}/search", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TavilyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let response: SearchResponse = resp.json().await?;
        tracing::debug!(count = response.results.len(), "Tavily search complete");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn search_sends_basic_depth_and_cap() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("authorization", "Bearer tvly-test"))
            .and(body_json(serde_json::json!({
                "query": "youth jobs",
                "search_depth": "basic",
                "max_results": 3
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": "youth jobs",
                "results": [
                    { "title": "Jobs report", "url": "https://news.example/jobs", "content": "Hiring is up", "score": 0.9 },
                    { "title": "Skills", "url": "https://news.example/skills", "content": "Soft skills matter" }
                ]
            })))
            .mount(&server)
            .await;

        let client = TavilyClient::new("tvly-test").with_base_url(server.uri());
        let results = client.search("youth jobs", 3).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Jobs report");
        assert_eq!(results[0].score, Some(0.9));
        assert_eq!(results[1].url, "https://news.example/skills");
        assert_eq!(results[1].score, None);
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;

        let client = TavilyClient::new("bad").with_base_url(server.uri());
        let err = client.search("q", 3).await.unwrap_err();
        assert!(matches!(err, TavilyError::Api { status: 401, .. }));
        assert_eq!(err.to_string(), "API error (status 401): invalid key");
    }

    #[tokio::test]
    async fn missing_results_key_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = TavilyClient::new("k").with_base_url(server.uri());
        assert!(client.search("q", 3).await.unwrap().is_empty());
    }
}
