//! Core configuration types for manual conversion
//!
//! This module contains the main `ManualConfig` struct and its associated types
//! that define which libraries are indexed, where pages come from and how
//! deep the crawl goes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::link_index::NodeId;
use crate::utils::{
    DEFAULT_CRAWL_RATE_RPS, DEFAULT_LIBRARY_NAME, DEFAULT_LIBRARY_SEED, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_RETRIES, DEFAULT_NODE_ID_WIDTH, DEFAULT_OUTPUT_ROOT, DEFAULT_PAGE_URL_TEMPLATE,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_BASE_DELAY_MS, DEFAULT_SOURCE_ENCODING,
    normalize_name,
};

/// One top-level manual section, indexed by a dedicated summary page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarySpec {
    /// Human-readable library name, also the key used to select the target library
    pub name: String,
    /// Node id of the library's index page
    pub seed: NodeId,
    /// Output subdirectory; defaults to the normalized name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

impl LibrarySpec {
    pub fn new(name: impl Into<String>, seed: impl Into<NodeId>) -> Self {
        Self {
            name: name.into(),
            seed: seed.into(),
            directory: None,
        }
    }

    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Directory this library's Markdown files are written to, relative to
    /// the output root. Also the path segment of cross-library links.
    #[must_use]
    pub fn directory(&self) -> String {
        self.directory
            .clone()
            .unwrap_or_else(|| normalize_name(&self.name))
    }
}

/// What happens when two entries of one library normalize to the same slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlugCollisionPolicy {
    /// Keep the slug; the later file overwrites the earlier one (reported)
    #[default]
    Overwrite,
    /// Give every later colliding entry the slug `<slug>_<id>`
    SuffixNodeId,
}

/// Main configuration struct for a conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualConfig {
    /// Root directory; every library gets its own subdirectory below it.
    pub(crate) output_root: PathBuf,
    /// Page URL with `{id}` standing in for the node id.
    pub(crate) page_url_template: String,
    /// `encoding_rs` label of the code page the pages are served in.
    pub(crate) source_encoding: String,
    /// Libraries in resolution order. Cross-library links resolve to the
    /// first library listed that owns the target id.
    pub(crate) libraries: Vec<LibrarySpec>,
    /// Name of the library whose entries are rendered.
    pub(crate) target_library: String,
    /// Number of crawl levels to render; `None` runs until nothing new is found.
    pub(crate) max_depth: Option<u8>,
    pub(crate) request_timeout_secs: u64,
    /// Retries after the first failed attempt; 0 disables retrying.
    pub(crate) max_retries: u8,
    pub(crate) retry_base_delay_ms: u64,
    /// Requests per second; `None` disables pacing.
    pub(crate) crawl_rate_rps: Option<f64>,
    /// Width bare numeric node ids are zero-padded to.
    pub(crate) node_id_width: usize,
    pub(crate) slug_collision_policy: SlugCollisionPolicy,
}

impl Default for ManualConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            page_url_template: DEFAULT_PAGE_URL_TEMPLATE.to_string(),
            source_encoding: DEFAULT_SOURCE_ENCODING.to_string(),
            libraries: default_libraries(),
            target_library: DEFAULT_LIBRARY_NAME.to_string(),
            max_depth: Some(DEFAULT_MAX_DEPTH),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            crawl_rate_rps: Some(DEFAULT_CRAWL_RATE_RPS),
            node_id_width: DEFAULT_NODE_ID_WIDTH,
            slug_collision_policy: SlugCollisionPolicy::Overwrite,
        }
    }
}

/// The Hardware Manual guide's register summary
#[must_use]
pub fn default_libraries() -> Vec<LibrarySpec> {
    vec![LibrarySpec::new(DEFAULT_LIBRARY_NAME, DEFAULT_LIBRARY_SEED)]
}
