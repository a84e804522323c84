//! Page fetch tool: download a URL and reduce it to readable text.

use async_trait::async_trait;
use scraper::{Html, Node};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::ToolError;
use crate::tool::{Tool, ToolArgs, ToolOutput};

use super::http_client;

/// Browser-like user agent; some sites refuse obvious bots.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                                  (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

const TIMEOUT: Duration = Duration::from_secs(20);

/// Default character budget for extracted text.
pub const DEFAULT_MAX_CHARS: i64 = 8000;

/// Appended to content cut at the character budget.
pub const TRUNCATION_MARKER: &str = "\n...";

/// Elements whose text never reaches the output.
const HIDDEN_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Successful fetch output.
#[derive(Debug, Serialize)]
pub struct PageContent {
    pub url: String,
    pub content: String,
}

/// Failure stage, each with its own message prefix.
enum FetchError {
    Request(ToolError),
    Parse(ToolError),
}

impl FetchError {
    fn message(self) -> String {
        match self {
            FetchError::Request(e) => format!("Request failed: {}", e),
            FetchError::Parse(e) => format!("Parse failed: {}", e),
        }
    }
}

/// Extract visible text from an HTML document.
///
/// Text inside `script`, `style` and `noscript` is dropped. Every remaining
/// text node starts a new line, as does any Unicode line or paragraph
/// separator inside it; lines are trimmed and blank ones removed.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut pieces: Vec<&str> = Vec::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            matches!(ancestor.value(), Node::Element(el) if HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            pieces.push(&**text);
        }
    }

    pieces
        .join("\n")
        .split(is_line_break)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Cut `text` to `max_chars` characters, appending the truncation marker.
///
/// The result may exceed the budget by the marker's length.
pub fn truncate_chars(text: String, max_chars: usize) -> String {
    let cut = text.char_indices().nth(max_chars).map(|(idx, _)| idx);
    match cut {
        Some(idx) => format!("{}{}", &text[..idx], TRUNCATION_MARKER),
        None => text,
    }
}

/// Whether the content type names a binary format with no text to extract.
///
/// Anything else, including missing or generic types, is parsed as HTML.
fn is_binary(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    ["image/", "audio/", "video/"]
        .iter()
        .any(|prefix| essence.starts_with(prefix))
        || essence == "application/pdf"
}

/// Page fetch tool.
///
/// Fetches a web page, strips scripts and styles, and returns the visible
/// text, limited to a character budget.
///
/// # Parameters
///
/// - `url` (required): The URL to fetch.
/// - `max_chars` (optional, default: 8000): Maximum characters of text to return.
///
/// # Examples
///
/// ```json
/// {"url": "https://example.com"}
/// {"url": "https://docs.rs/tokio", "max_chars": 2000}
/// ```
pub struct FetchUrl {
    client: reqwest::Client,
}

impl FetchUrl {
    /// Create a new page fetch tool.
    pub fn new() -> Self {
        Self {
            client: http_client(BROWSER_USER_AGENT, TIMEOUT),
        }
    }

    /// Fetch a page and return the `{"url", "content"}` or `{"error"}` JSON.
    pub async fn fetch(&self, url: &str, max_chars: i64) -> String {
        self.fetch_output(url, max_chars).await.content
    }

    async fn fetch_output(&self, url: &str, max_chars: i64) -> ToolOutput {
        match self.run(url, max_chars).await {
            Ok(page) => ToolOutput::json(&page),
            Err(e) => {
                let message = e.message();
                warn!("{} failed: {}", self.name(), message);
                ToolOutput::error(message)
            }
        }
    }

    async fn run(&self, url: &str, max_chars: i64) -> Result<PageContent, FetchError> {
        let response = self.send(url).await.map_err(FetchError::Request)?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if is_binary(&content_type) {
            return Err(FetchError::Parse(ToolError::Parse(format!(
                "unsupported content type: {}",
                content_type
            ))));
        }

        // Decodes with the charset from Content-Type, falling back to UTF-8.
        let html = response
            .text()
            .await
            .map_err(|e| FetchError::Request(ToolError::Transport(e.to_string())))?;

        let text = extract_text(&html);
        let max_chars = usize::try_from(max_chars).unwrap_or(0);

        debug!(
            "Extracted {} chars from {} (budget {})",
            text.chars().count(),
            url,
            max_chars
        );

        Ok(PageContent {
            url: url.to_string(),
            content: truncate_chars(text, max_chars),
        })
    }

    /// Request stage: a response with a success status.
    async fn send(&self, url: &str) -> Result<reqwest::Response, ToolError> {
        let parsed = Url::parse(url)
            .map_err(|e| ToolError::Transport(format!("Invalid URL '{}': {}", url, e)))?;

        debug!("Fetching URL: {}", parsed);

        Ok(self.client.get(parsed).send().await?.error_for_status()?)
    }
}

impl Default for FetchUrl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for FetchUrl {
    fn name(&self) -> &str {
        "fetch_url"
    }

    fn description(&self) -> &str {
        "Fetches a URL and extracts its readable text content, with scripts and \
         styles removed."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "url": { "type": "string", "description": "URL to fetch" },
                "max_chars": {
                    "type": "integer",
                    "description": "Maximum characters of text to return",
                    "default": DEFAULT_MAX_CHARS
                }
            },
            "required": ["url"]
        })
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let url = args.get_string("url")?;
        let max_chars = args.get_integer_or("max_chars", DEFAULT_MAX_CHARS)?;

        Ok(self.fetch_output(&url, max_chars).await)
    }
}
