//! Research tools for language-model agents.
//!
//! This crate provides a small set of tools that fetch information from
//! external services and hand it back to an agent as JSON. Every tool takes
//! scalar arguments, makes one outbound request, and returns either its own
//! success object or `{"error": "..."}`; failures never escape as errors.
//!
//! # Built-in Tools
//!
//! - [`GoogleSearch`] - Web search via Google Custom Search (needs credentials).
//! - [`FetchUrl`] - Fetch a page and extract its visible text.
//! - [`Wikipedia`] - Introductory summary of a Wikipedia article.
//! - [`ArxivSearch`] - Paper metadata from the arXiv query API.
//!
//! # Example
//!
//! ```rust,ignore
//! use research_tools::{assemble_tools, ResearchToolsConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = assemble_tools(&ResearchToolsConfig::from_env());
//!
//!     let result = registry
//!         .execute_json("wikipedia", r#"{"topic": "Ada Lovelace", "sentences": 2}"#)
//!         .await
//!         .unwrap();
//!     println!("{}", result.content);
//! }
//! ```

mod config;
mod error;
mod registry;
mod tool;
pub mod tools;

pub use config::{
    ResearchToolsConfig, ResearchToolsConfigBuilder, SearchCredentials, GOOGLE_API_KEY_VAR,
    GOOGLE_CSE_ID_VAR,
};
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use tool::{Tool, ToolArgs, ToolOutput};
pub use tools::{ArxivSearch, FetchUrl, GoogleSearch, Wikipedia};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

/// Assemble the tools available under `config`.
///
/// Page fetch, Wikipedia and arXiv are always present, in that order. Google
/// search is placed first, and only when both credentials are configured.
pub fn assemble_tools(config: &ResearchToolsConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(FetchUrl::new());
    registry.register(Wikipedia::new().with_endpoint(&config.wikipedia_url));
    registry.register(ArxivSearch::new().with_endpoint(&config.arxiv_url));

    if let Some(credentials) = &config.search_credentials {
        registry.register_first(
            GoogleSearch::new(Some(credentials.clone())).with_endpoint(&config.google_search_url),
        );
    }

    registry
}

/// Assemble tools from the environment as it is right now.
pub fn assemble_tools_from_env() -> ToolRegistry {
    assemble_tools(&ResearchToolsConfig::from_env())
}
