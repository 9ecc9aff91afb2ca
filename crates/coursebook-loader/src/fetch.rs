//! Markdown fetching.
//!
//! [`MarkdownFetcher`] is the seam between the chapter source and the
//! network. [`HttpFetcher`] is the real implementation; [`MemoryFetcher`]
//! serves fixed documents for offline use and tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{Error, Result};

/// Default request timeout for [`HttpFetcher`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of raw chapter markdown.
#[async_trait]
pub trait MarkdownFetcher: Send + Sync {
    /// Fetch the document at `url` as text.
    ///
    /// Non-success responses are errors.
    async fn fetch(&self, url: &str) -> Result<String>;

    /// Fetcher name for diagnostics.
    fn name(&self) -> &str;
}

/// Join a base URL and a root-relative markdown path.
///
/// Exactly one `/` separates the two; the path's leading `/` is dropped.
///
/// ```rust
/// use coursebook_loader::resolve_url;
///
/// assert_eq!(resolve_url("http://localhost:5173/", "/data/sql.md"), "http://localhost:5173/data/sql.md");
/// assert_eq!(resolve_url("https://x.dev/course", "data/sql.md"), "https://x.dev/course/data/sql.md");
/// ```
pub fn resolve_url(base_url: &str, markdown_path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        markdown_path.trim_start_matches('/')
    )
}

// ============================================================================
// HTTP
// ============================================================================

/// Fetches markdown over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("coursebook-loader/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MarkdownFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        log::debug!("GET {url}");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    fn name(&self) -> &str {
        "http"
    }
}

// ============================================================================
// In-memory
// ============================================================================

/// Serves documents from a map keyed by URL.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    documents: HashMap<String, String>,
}

impl MemoryFetcher {
    /// Create an empty fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document.
    pub fn with_document(mut self, url: impl Into<String>, markdown: impl Into<String>) -> Self {
        self.documents.insert(url.into(), markdown.into());
        self
    }

    /// Number of documents held.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no documents are held.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl MarkdownFetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| coursebook_core::Error::fetch(url, "no such document").into())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
