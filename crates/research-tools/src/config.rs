//! Configuration for the research tools.

use std::env;

/// Environment variable holding the Custom Search API key.
pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_SEARCH_JSON_API_KEY";

/// Environment variable holding the Custom Search engine id.
pub const GOOGLE_CSE_ID_VAR: &str = "GOOGLE_CSE_ID";

/// Default Google Custom Search endpoint.
pub const DEFAULT_GOOGLE_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Default Wikipedia REST summary endpoint (the topic is appended).
pub const DEFAULT_WIKIPEDIA_URL: &str = "https://en.wikipedia.org/api/rest_v1/page/summary";

/// Default arXiv query endpoint.
pub const DEFAULT_ARXIV_URL: &str = "http://export.arxiv.org/api/query";

/// Credentials for the Google Custom Search JSON API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCredentials {
    /// API key (`key` query parameter).
    pub api_key: String,
    /// Search engine id (`cx` query parameter).
    pub engine_id: String,
}

impl SearchCredentials {
    /// Create credentials, treating empty values as absent.
    pub fn new(api_key: impl Into<String>, engine_id: impl Into<String>) -> Option<Self> {
        let api_key = api_key.into();
        let engine_id = engine_id.into();
        if api_key.is_empty() || engine_id.is_empty() {
            return None;
        }
        Some(Self { api_key, engine_id })
    }

    /// Read both credentials from the environment.
    ///
    /// Returns `None` when either variable is unset or empty.
    pub fn from_env() -> Option<Self> {
        let api_key = env::var(GOOGLE_API_KEY_VAR).ok()?;
        let engine_id = env::var(GOOGLE_CSE_ID_VAR).ok()?;
        Self::new(api_key, engine_id)
    }
}

/// Configuration shared by the research tools.
#[derive(Debug, Clone)]
pub struct ResearchToolsConfig {
    /// Custom Search credentials. Web search is only registered when set.
    pub search_credentials: Option<SearchCredentials>,

    /// Custom Search endpoint.
    pub google_search_url: String,

    /// Wikipedia summary endpoint.
    pub wikipedia_url: String,

    /// arXiv query endpoint.
    pub arxiv_url: String,
}

impl Default for ResearchToolsConfig {
    fn default() -> Self {
        Self {
            search_credentials: None,
            google_search_url: DEFAULT_GOOGLE_SEARCH_URL.to_string(),
            wikipedia_url: DEFAULT_WIKIPEDIA_URL.to_string(),
            arxiv_url: DEFAULT_ARXIV_URL.to_string(),
        }
    }
}

impl ResearchToolsConfig {
    /// Create configuration from environment variables.
    ///
    /// Credentials:
    /// - `GOOGLE_SEARCH_JSON_API_KEY` - Custom Search API key
    /// - `GOOGLE_CSE_ID` - Custom Search engine id
    ///
    /// Optional endpoint overrides:
    /// - `GOOGLE_SEARCH_API_URL` (default: https://www.googleapis.com/customsearch/v1)
    /// - `WIKIPEDIA_API_URL` (default: https://en.wikipedia.org/api/rest_v1/page/summary)
    /// - `ARXIV_API_URL` (default: http://export.arxiv.org/api/query)
    ///
    /// Nothing here is required; missing credentials only disable web search.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            search_credentials: SearchCredentials::from_env(),
            google_search_url: env_or("GOOGLE_SEARCH_API_URL", defaults.google_search_url),
            wikipedia_url: env_or("WIKIPEDIA_API_URL", defaults.wikipedia_url),
            arxiv_url: env_or("ARXIV_API_URL", defaults.arxiv_url),
        }
    }

    /// Create a new config builder.
    pub fn builder() -> ResearchToolsConfigBuilder {
        ResearchToolsConfigBuilder::default()
    }

    /// Whether the web search tool can be offered.
    pub fn has_search_credentials(&self) -> bool {
        self.search_credentials.is_some()
    }
}

fn env_or(key: &str, default: String) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

/// Builder for ResearchToolsConfig.
#[derive(Debug, Default)]
pub struct ResearchToolsConfigBuilder {
    config: ResearchToolsConfig,
}

impl ResearchToolsConfigBuilder {
    /// Set the Custom Search credentials. Empty values leave search disabled.
    pub fn search_credentials(
        mut self,
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
    ) -> Self {
        self.config.search_credentials = SearchCredentials::new(api_key, engine_id);
        self
    }

    /// Set the Custom Search endpoint.
    pub fn google_search_url(mut self, url: impl Into<String>) -> Self {
        self.config.google_search_url = url.into();
        self
    }

    /// Set the Wikipedia summary endpoint.
    pub fn wikipedia_url(mut self, url: impl Into<String>) -> Self {
        self.config.wikipedia_url = url.into();
        self
    }

    /// Set the arXiv query endpoint.
    pub fn arxiv_url(mut self, url: impl Into<String>) -> Self {
        self.config.arxiv_url = url.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ResearchToolsConfig {
        self.config
    }
}
