//! arXiv search tool using the Atom query API.

use async_trait::async_trait;
use roxmltree::{Document, Node};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::config::DEFAULT_ARXIV_URL;
use crate::error::ToolError;
use crate::tool::{clamp_arg, Tool, ToolArgs, ToolOutput};

use super::http_client;

const TIMEOUT: Duration = Duration::from_secs(20);

/// Feed elements live in the Atom namespace; `arxiv:*` extensions are ignored.
const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// One paper from the feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paper {
    pub arxiv_id: Option<String>,
    pub title: String,
    pub authors: Vec<String>,
    pub summary: String,
    pub published: String,
    pub updated: String,
    pub categories: Vec<String>,
    pub abstract_url: Option<String>,
    pub pdf_url: Option<String>,
}

/// Successful search output.
#[derive(Debug, Serialize)]
pub struct PaperResults {
    pub query: String,
    pub total_results: usize,
    pub papers: Vec<Paper>,
}

fn atom_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name((ATOM_NS, name)))
}

fn atom_children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| n.has_tag_name((ATOM_NS, name)))
}

fn child_text(node: Node, name: &str) -> String {
    atom_child(node, name)
        .and_then(|n| n.text())
        .unwrap_or_default()
        .to_string()
}

fn parse_entry(entry: Node) -> Paper {
    let authors = atom_children(entry, "author")
        .filter_map(|author| atom_child(author, "name"))
        .map(|name| name.text().unwrap_or_default().to_string())
        .collect();

    let mut pdf_url = None;
    let mut abstract_url = None;
    for link in atom_children(entry, "link") {
        if link.attribute("title") == Some("pdf") {
            pdf_url = link.attribute("href").map(str::to_string);
        } else if link.attribute("rel") == Some("alternate") {
            abstract_url = link.attribute("href").map(str::to_string);
        }
    }

    let arxiv_id = abstract_url
        .as_deref()
        .and_then(|url| url.rsplit('/').next())
        .map(str::to_string);

    let categories = atom_children(entry, "category")
        .filter_map(|category| category.attribute("term"))
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect();

    Paper {
        arxiv_id,
        title: child_text(entry, "title").trim().to_string(),
        authors,
        summary: child_text(entry, "summary").trim().to_string(),
        published: child_text(entry, "published"),
        updated: child_text(entry, "updated"),
        categories,
        abstract_url,
        pdf_url,
    }
}

/// Parse an arXiv Atom feed into papers, in feed order.
pub fn parse_feed(xml: &str) -> Result<Vec<Paper>, ToolError> {
    let document = Document::parse(xml)?;
    Ok(atom_children(document.root_element(), "entry")
        .map(parse_entry)
        .collect())
}

/// arXiv search tool.
///
/// Searches arXiv preprints across physics, mathematics, computer science,
/// quantitative biology and finance, statistics, electrical engineering and
/// economics, sorted by relevance.
///
/// # Parameters
///
/// - `query` (required): Keywords, author names or arXiv ids.
/// - `max_results` (optional, default: 5): Papers to return, clamped to 1-20.
///
/// # Examples
///
/// ```json
/// {"query": "retrieval augmented generation"}
/// {"query": "diffusion models", "max_results": 10}
/// ```
pub struct ArxivSearch {
    client: reqwest::Client,
    endpoint: String,
}

impl ArxivSearch {
    /// Create a new arXiv search tool.
    pub fn new() -> Self {
        Self {
            client: http_client(super::AGENT_USER_AGENT, TIMEOUT),
            endpoint: DEFAULT_ARXIV_URL.to_string(),
        }
    }

    /// Use a different query endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Search papers and return the results or `{"error"}` JSON.
    pub async fn search_papers(&self, query: &str, max_results: i64) -> String {
        self.search_output(query, max_results).await.content
    }

    async fn search_output(&self, query: &str, max_results: i64) -> ToolOutput {
        let result = self.run(query, max_results).await;
        ToolOutput::from_result(self.name(), result, |e| {
            format!("arXiv search failed: {}", e)
        })
    }

    async fn run(&self, query: &str, max_results: i64) -> Result<PaperResults, ToolError> {
        let max_results = clamp_arg(max_results, 1, 20).to_string();
        let search_query = format!("all:{}", query);

        debug!("arXiv search: {} (max {})", search_query, max_results);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("search_query", search_query.as_str()),
                ("start", "0"),
                ("max_results", max_results.as_str()),
                ("sortBy", "relevance"),
                ("sortOrder", "descending"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let papers = parse_feed(&body)?;

        debug!("arXiv returned {} papers", papers.len());

        Ok(PaperResults {
            query: query.to_string(),
            total_results: papers.len(),
            papers,
        })
    }
}

impl Default for ArxivSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ArxivSearch {
    fn name(&self) -> &str {
        "arxiv_search"
    }

    fn description(&self) -> &str {
        "Searches arXiv for academic papers and preprints. Returns title, authors, \
         abstract, categories and PDF link for each paper."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query (keywords, author names, or arXiv ids)"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of papers to return (1-20)",
                    "default": 5
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let query = args.get_string("query")?;
        let max_results = args.get_integer_or("max_results", 5)?;

        Ok(self.search_output(&query, max_results).await)
    }
}
