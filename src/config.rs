use crate::{HackerNewsError, Result};
use std::env;

/// Default site serving the HTML pages and forms.
pub const DEFAULT_WEB_BASE_URL: &str = "https://news.ycombinator.com";

/// Default read-only JSON API.
pub const DEFAULT_API_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

/// Client configuration.
///
/// # Examples
///
/// ```rust
/// use hackernews_client::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_web_base_url("http://localhost:8080")
///     .with_rejection_markers(vec!["error".to_string(), "Unknown".to_string(), "too fast".to_string()]);
///
/// assert_eq!(config.web_base_url, "http://localhost:8080");
/// assert_eq!(config.rejection_markers.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL for pages and form posts
    pub web_base_url: String,
    /// Base URL for the JSON read API
    pub api_base_url: String,
    /// Body substrings that mark a submit/comment response as rejected.
    ///
    /// Matching is case-sensitive. The site publishes no list of its error pages,
    /// so this is a best-effort set.
    pub rejection_markers: Vec<String>,
    /// Write every response body under `debug_responses/`
    pub debug_save_responses: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            web_base_url: DEFAULT_WEB_BASE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            rejection_markers: vec!["error".to_string(), "Unknown".to_string()],
            debug_save_responses: env::var("HN_DEBUG_SAVE_RESPONSES").is_ok(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with base URLs overridden by `HN_WEB_BASE_URL` / `HN_API_BASE_URL`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("HN_WEB_BASE_URL") {
            config = config.with_web_base_url(url);
        }
        if let Ok(url) = env::var("HN_API_BASE_URL") {
            config = config.with_api_base_url(url);
        }
        config
    }

    pub fn with_web_base_url(mut self, url: impl Into<String>) -> Self {
        self.web_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the rejection markers.
    pub fn with_rejection_markers(mut self, markers: Vec<String>) -> Self {
        self.rejection_markers = markers;
        self
    }

    pub fn with_debug_save_responses(mut self, enabled: bool) -> Self {
        self.debug_save_responses = enabled;
        self
    }
}

/// A username/password pair for [`login`](crate::HackerNewsClient::login).
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Assemble credentials from explicit values, falling back to the
    /// `HN_USERNAME` / `HN_PASSWORD` environment variables for each missing piece.
    pub fn resolve(username: Option<String>, password: Option<String>) -> Result<Self> {
        Self::resolve_with(username, password, |name| env::var(name).ok())
    }

    /// Like [`resolve`](Self::resolve) with an explicit variable lookup.
    ///
    /// Empty strings count as missing, both as arguments and as lookup results.
    pub fn resolve_with<F>(
        username: Option<String>,
        password: Option<String>,
        lookup: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |given: Option<String>, var: &str| {
            given
                .filter(|value| !value.is_empty())
                .or_else(|| lookup(var).filter(|value| !value.is_empty()))
        };

        match (pick(username, "HN_USERNAME"), pick(password, "HN_PASSWORD")) {
            (Some(username), Some(password)) => Ok(Self { username, password }),
            _ => Err(HackerNewsError::MissingCredentials),
        }
    }
}
