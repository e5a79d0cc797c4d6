//! Builder methods available for all states
//!
//! This module contains methods that can be called on the builder
//! regardless of its current type state.

use super::builder::ManualConfigBuilder;
use super::types::{LibrarySpec, SlugCollisionPolicy};

impl<State> ManualConfigBuilder<State> {
    /// Add a library to the resolution set.
    ///
    /// Libraries are consulted in the order they are added. If none are
    /// added, the built-in Hardware Manual library set is used.
    #[must_use]
    pub fn library(mut self, library: LibrarySpec) -> Self {
        self.libraries.push(library);
        self
    }

    #[must_use]
    pub fn libraries(mut self, libraries: Vec<LibrarySpec>) -> Self {
        self.libraries = libraries;
        self
    }

    /// Set the page URL template; `{id}` is replaced by the node id.
    ///
    /// # Example
    /// ```rust
    /// # use nodescrape::config::{LibrarySpec, ManualConfig};
    /// # use nodescrape::link_index::NodeId;
    /// # fn main() -> Result<(), nodescrape::CrawlError> {
    /// let config = ManualConfig::builder()
    ///     .output_root("./docs")
    ///     .target_library("exec")
    ///     .library(LibrarySpec::new("exec", "0042"))
    ///     .page_url_template("https://example.com/guide/node{id}.html")
    ///     .build()?;
    /// assert_eq!(config.page_url(&NodeId::from("0043")), "https://example.com/guide/node0043.html");
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn page_url_template(mut self, template: impl Into<String>) -> Self {
        self.page_url_template = template.into();
        self
    }

    #[must_use]
    pub fn source_encoding(mut self, label: impl Into<String>) -> Self {
        self.source_encoding = label.into();
        self
    }

    /// Limit the crawl to `depth` levels; `None` crawls until no new page
    /// is discovered.
    #[must_use]
    pub fn max_depth(mut self, depth: Option<u8>) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Set maximum retry attempts for transient fetch failures
    ///
    /// Set to 0 to make the first failure fatal.
    #[must_use]
    pub fn max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    #[must_use]
    pub fn retry_base_delay_ms(mut self, millis: u64) -> Self {
        self.retry_base_delay_ms = millis;
        self
    }

    #[must_use]
    pub fn crawl_rate_rps(mut self, rate: Option<f64>) -> Self {
        self.crawl_rate_rps = rate;
        self
    }

    #[must_use]
    pub fn node_id_width(mut self, width: usize) -> Self {
        self.node_id_width = width;
        self
    }

    #[must_use]
    pub fn slug_collision_policy(mut self, policy: SlugCollisionPolicy) -> Self {
        self.slug_collision_policy = policy;
        self
    }
}
