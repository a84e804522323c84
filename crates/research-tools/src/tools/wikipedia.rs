//! Wikipedia summary tool using the REST page summary endpoint.

use async_trait::async_trait;
use regex::Regex;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

use crate::config::DEFAULT_WIKIPEDIA_URL;
use crate::error::ToolError;
use crate::tool::{clamp_arg, Tool, ToolArgs, ToolOutput};

use super::http_client;

const TIMEOUT: Duration = Duration::from_secs(15);

/// Sentence terminator followed by the whitespace that separates sentences.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid sentence regex"));

/// Response from the page summary endpoint.
#[derive(Debug, Deserialize)]
struct SummaryResponse {
    title: Option<String>,
    extract: Option<String>,
    content_urls: Option<ContentUrls>,
    thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: Option<PageUrls>,
}

#[derive(Debug, Deserialize)]
struct PageUrls {
    page: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    source: Option<String>,
}

/// Successful summary output.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub title: String,
    pub summary: String,
    pub url: String,
    pub thumbnail: Option<String>,
}

/// Keep the first `count` sentences of `text`, joined by single spaces.
///
/// A sentence ends at `.`, `!` or `?` when whitespace follows it.
pub fn first_sentences(text: &str, count: usize) -> String {
    let mut sentences = Vec::new();
    let mut rest = 0;
    for m in SENTENCE_BREAK.find_iter(text) {
        // The terminator is one ASCII byte.
        sentences.push(&text[rest..m.start() + 1]);
        rest = m.end();
    }
    sentences.push(&text[rest..]);

    sentences
        .into_iter()
        .take(count)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Wikipedia summary tool.
///
/// Returns the introduction of an English Wikipedia article, cut to a
/// number of sentences, with its canonical URL and thumbnail.
///
/// # Parameters
///
/// - `topic` (required): Article title to look up.
/// - `sentences` (optional, default: 3): Sentences to keep, clamped to 1-10.
///
/// # Examples
///
/// ```json
/// {"topic": "Rust (programming language)"}
/// {"topic": "Alan Turing", "sentences": 5}
/// ```
pub struct Wikipedia {
    client: reqwest::Client,
    endpoint: String,
}

impl Wikipedia {
    /// Create a new Wikipedia tool.
    pub fn new() -> Self {
        Self {
            client: http_client(super::AGENT_USER_AGENT, TIMEOUT),
            endpoint: DEFAULT_WIKIPEDIA_URL.to_string(),
        }
    }

    /// Use a different summary endpoint. The encoded topic is appended as a path segment.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Summarize a topic and return the summary or `{"error"}` JSON.
    pub async fn summarize(&self, topic: &str, sentences: i64) -> String {
        self.summarize_output(topic, sentences).await.content
    }

    async fn summarize_output(&self, topic: &str, sentences: i64) -> ToolOutput {
        let result = self.run(topic, sentences).await;
        ToolOutput::from_result(self.name(), result, |e| match e.status() {
            Some(StatusCode::NOT_FOUND) => {
                format!("Wikipedia article not found for topic: {}", topic)
            }
            Some(_) => format!("Wikipedia API error: {}", e),
            None => format!("Failed to fetch Wikipedia summary: {}", e),
        })
    }

    async fn run(&self, topic: &str, sentences: i64) -> Result<Summary, ToolError> {
        let sentences = clamp_arg(sentences, 1, 10) as usize;
        let url = format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(topic)
        );

        debug!("Fetching Wikipedia summary: {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;
        let data: SummaryResponse = serde_json::from_str(&body)?;

        let extract = data.extract.unwrap_or_default();

        Ok(Summary {
            title: data.title.unwrap_or_else(|| topic.to_string()),
            summary: first_sentences(&extract, sentences),
            url: data
                .content_urls
                .and_then(|urls| urls.desktop)
                .and_then(|desktop| desktop.page)
                .unwrap_or_default(),
            thumbnail: data
                .thumbnail
                .map(|thumbnail| thumbnail.source.unwrap_or_default()),
        })
    }
}

impl Default for Wikipedia {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for Wikipedia {
    fn name(&self) -> &str {
        "wikipedia"
    }

    fn description(&self) -> &str {
        "Gets the introductory summary of a Wikipedia article. Use for encyclopedic \
         facts about people, places, concepts and historical events."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "topic": {
                    "type": "string",
                    "description": "Wikipedia article title to look up"
                },
                "sentences": {
                    "type": "integer",
                    "description": "Number of sentences to return (1-10)",
                    "default": 3
                }
            },
            "required": ["topic"]
        })
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let topic = args.get_string("topic")?;
        let sentences = args.get_integer_or("sentences", 3)?;

        Ok(self.summarize_output(&topic, sentences).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const FIVE: &str = "One is first. Two follows! Is three a question? Four.  Five ends.";

    #[test]
    fn test_first_sentences() {
        assert_eq!(first_sentences(FIVE, 2), "One is first. Two follows!");
        assert_eq!(
            first_sentences(FIVE, 4),
            "One is first. Two follows! Is three a question? Four."
        );
        assert_eq!(
            first_sentences(FIVE, 10),
            "One is first. Two follows! Is three a question? Four. Five ends."
        );
    }

    #[test]
    fn test_first_sentences_needs_whitespace_after_terminator() {
        // Decimal points and abbreviations without a following space do not split.
        let text = "Version 1.5 shipped.\nIt was e.g.fine. Done";
        assert_eq!(first_sentences(text, 1), "Version 1.5 shipped.");
        assert_eq!(first_sentences(text, 2), "Version 1.5 shipped. It was e.g.fine.");
    }

    #[test]
    fn test_first_sentences_empty() {
        assert_eq!(first_sentences("", 3), "");
        assert_eq!(first_sentences("No terminator", 1), "No terminator");
    }

    #[test]
    fn test_missing_thumbnail_is_none() {
        let data: SummaryResponse =
            serde_json::from_value(json!({ "title": "X", "extract": "Y." })).unwrap();
        assert!(data.thumbnail.is_none());
        assert!(data.content_urls.is_none());
    }

    #[tokio::test]
    async fn test_missing_topic() {
        let tool = Wikipedia::new();
        let result = tool.execute(ToolArgs::new(HashMap::new())).await;
        assert!(matches!(result, Err(ToolError::MissingParameter(_))));
    }

    #[tokio::test]
    #[ignore] // Requires network
    async fn test_live_summary() {
        let tool = Wikipedia::new();
        let output = tool.summarize("Rust (programming language)", 2).await;
        let value: Value = serde_json::from_str(&output).unwrap();
        assert!(value["summary"].as_str().unwrap().contains("Rust"));
    }
}
