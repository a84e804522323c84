//! Built-in tool implementations.

mod arxiv;
mod fetch_url;
mod google_search;
mod wikipedia;

use std::time::Duration;

pub use arxiv::{parse_feed, ArxivSearch, Paper, PaperResults};
pub use fetch_url::{extract_text, truncate_chars, FetchUrl, PageContent, TRUNCATION_MARKER};
pub use google_search::{GoogleSearch, SearchItem, SearchResults, MISSING_CREDENTIALS};
pub use wikipedia::{first_sentences, Summary, Wikipedia};

/// User agent for the API tools.
pub const AGENT_USER_AGENT: &str = "OpenDeepResearch/1.0";

/// Build the per-tool HTTP client.
fn http_client(user_agent: &str, timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client")
}
