//! Web search tool using the Google Custom Search JSON API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::config::{SearchCredentials, DEFAULT_GOOGLE_SEARCH_URL};
use crate::error::ToolError;
use crate::tool::{clamp_arg, Tool, ToolArgs, ToolOutput};

use super::http_client;

/// Message returned when the search credentials are not configured.
pub const MISSING_CREDENTIALS: &str =
    "Missing environment variables: GOOGLE_SEARCH_JSON_API_KEY or GOOGLE_CSE_ID";

const TIMEOUT: Duration = Duration::from_secs(20);

/// Response from the Custom Search API. Only `items` is used.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Option<Vec<SearchItem>>,
}

/// One normalized search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default, rename = "displayLink")]
    pub display_link: Option<String>,
}

/// Successful search output.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub items: Vec<SearchItem>,
}

/// Web search tool backed by Google Custom Search.
///
/// # Parameters
///
/// - `query` (required): Search query string.
/// - `num` (optional, default: 5): Number of results, clamped to 1-10.
/// - `start` (optional, default: 1): 1-based index of the first result.
///
/// # Examples
///
/// ```json
/// {"query": "rust async runtimes"}
/// {"query": "tokio vs async-std", "num": 10, "start": 11}
/// ```
pub struct GoogleSearch {
    client: reqwest::Client,
    credentials: Option<SearchCredentials>,
    endpoint: String,
}

impl GoogleSearch {
    /// Create a search tool. Without credentials every call reports the
    /// missing configuration instead of issuing a request.
    pub fn new(credentials: Option<SearchCredentials>) -> Self {
        Self {
            client: http_client(super::AGENT_USER_AGENT, TIMEOUT),
            credentials,
            endpoint: DEFAULT_GOOGLE_SEARCH_URL.to_string(),
        }
    }

    /// Create a search tool with credentials read from the environment now.
    pub fn from_env() -> Self {
        Self::new(SearchCredentials::from_env())
    }

    /// Use a different API endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Search and return the `{"items": [...]}` or `{"error": ...}` JSON.
    pub async fn search(&self, query: &str, num: i64, start: i64) -> String {
        self.search_output(query, num, start).await.content
    }

    async fn search_output(&self, query: &str, num: i64, start: i64) -> ToolOutput {
        let result = self.run(query, num, start).await;
        ToolOutput::from_result(self.name(), result, |e| match e {
            ToolError::Configuration(msg) => msg,
            other => format!("Search failed: {}", other),
        })
    }

    async fn run(&self, query: &str, num: i64, start: i64) -> Result<SearchResults, ToolError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| ToolError::Configuration(MISSING_CREDENTIALS.to_string()))?;

        let num = clamp_arg(num, 1, 10);
        let start = clamp_arg(start, 1, i64::from(u32::MAX));

        debug!("Google search: q={:?}, num={}, start={}", query, num, start);

        let num = num.to_string();
        let start = start.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", credentials.api_key.as_str()),
                ("cx", credentials.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
                ("start", start.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        let items = parsed.items.unwrap_or_default();

        debug!("Google search returned {} items", items.len());

        Ok(SearchResults { items })
    }
}

impl Default for GoogleSearch {
    fn default() -> Self {
        Self::from_env()
    }
}

#[async_trait]
impl Tool for GoogleSearch {
    fn name(&self) -> &str {
        "google_search"
    }

    fn description(&self) -> &str {
        "Searches the web with Google Custom Search. Returns title, link, snippet \
         and displayLink for each result."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Search query string" },
                "num": {
                    "type": "integer",
                    "description": "Number of results to return (1-10)",
                    "default": 5
                },
                "start": {
                    "type": "integer",
                    "description": "Index of the first result (1-based)",
                    "default": 1
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let query = args.get_string("query")?;
        let num = args.get_integer_or("num", 5)?;
        let start = args.get_integer_or("start", 1)?;

        Ok(self.search_output(&query, num, start).await)
    }
}
