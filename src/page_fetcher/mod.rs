//! Page retrieval.
//!
//! The crawl only needs one operation from the outside world: the HTML text
//! of a node. [`PageSource`] is that seam. [`HttpPageSource`] fetches from the
//! configured host; [`StaticPageSource`] serves pages from memory for offline
//! runs and tests.

use std::collections::HashMap;
use std::future::Future;

use crate::link_index::NodeId;

mod http;

pub use http::HttpPageSource;

/// Why a page could not be fetched.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport failure, including timeouts
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    /// The source has no page for this node
    #[error("no page for node {0}")]
    Missing(NodeId),

    /// The node id does not form a valid page URL
    #[error("invalid page URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl FetchError {
    /// Whether retrying the same request may succeed.
    ///
    /// Transport errors, server errors and rate limiting (429) are
    /// transient; other statuses and missing pages are permanent.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Missing(_) | Self::InvalidUrl { .. } => false,
        }
    }
}

/// Something that can produce the raw HTML of a node.
pub trait PageSource {
    /// Fetch and decode the page of `id`.
    fn fetch(&self, id: &NodeId) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// In-memory pages keyed by node id.
#[derive(Debug, Clone, Default)]
pub struct StaticPageSource {
    pages: HashMap<NodeId, String>,
}

impl StaticPageSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(mut self, id: impl Into<NodeId>, html: impl Into<String>) -> Self {
        self.insert(id, html);
        self
    }

    pub fn insert(&mut self, id: impl Into<NodeId>, html: impl Into<String>) {
        self.pages.insert(id.into(), html.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageSource for StaticPageSource {
    async fn fetch(&self, id: &NodeId) -> Result<String, FetchError> {
        self.pages
            .get(id)
            .cloned()
            .ok_or_else(|| FetchError::Missing(id.clone()))
    }
}

/// Decode a page body served in the legacy code page `label`.
///
/// Unknown labels fall back to windows-1252; bytes the code page cannot map
/// become U+FFFD rather than failing the page.
#[must_use]
pub fn decode_page(bytes: &[u8], label: &str) -> String {
    let encoding =
        encoding_rs::Encoding::for_label(label.as_bytes()).unwrap_or(encoding_rs::WINDOWS_1252);
    let (text, _, malformed) = encoding.decode(bytes);
    if malformed {
        log::debug!("Page contained bytes not valid in {}", encoding.name());
    }
    text.into_owned()
}
