//! Getter methods for `ManualConfig`
//!
//! This module provides all the accessor methods for retrieving configuration
//! values from a `ManualConfig` instance.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::types::{LibrarySpec, ManualConfig, SlugCollisionPolicy};
use crate::link_index::NodeId;
use crate::utils::NODE_ID_PLACEHOLDER;

impl ManualConfig {
    #[must_use]
    pub fn output_root(&self) -> &PathBuf {
        &self.output_root
    }

    #[must_use]
    pub fn page_url_template(&self) -> &str {
        &self.page_url_template
    }

    /// Expand the page URL template for one node.
    #[must_use]
    pub fn page_url(&self, id: &NodeId) -> String {
        self.page_url_template.replace(NODE_ID_PLACEHOLDER, id.as_str())
    }

    #[must_use]
    pub fn source_encoding(&self) -> &str {
        &self.source_encoding
    }

    #[must_use]
    pub fn libraries(&self) -> &[LibrarySpec] {
        &self.libraries
    }

    #[must_use]
    pub fn target_library(&self) -> &str {
        &self.target_library
    }

    /// Spec of the target library. `build()` guarantees it exists.
    #[must_use]
    pub fn target_library_spec(&self) -> Option<&LibrarySpec> {
        self.libraries
            .iter()
            .find(|library| library.name == self.target_library)
    }

    /// Directory the target library's files are written to.
    #[must_use]
    pub fn target_dir(&self) -> PathBuf {
        self.target_library_spec()
            .map_or_else(|| self.output_root.clone(), |library| self.library_dir(library))
    }

    #[must_use]
    pub fn library_dir(&self, library: &LibrarySpec) -> PathBuf {
        Path::new(&self.output_root).join(library.directory())
    }

    #[must_use]
    pub fn max_depth(&self) -> Option<u8> {
        self.max_depth
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub fn max_retries(&self) -> u8 {
        self.max_retries
    }

    #[must_use]
    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    #[must_use]
    pub fn crawl_rate_rps(&self) -> Option<f64> {
        self.crawl_rate_rps
    }

    #[must_use]
    pub fn node_id_width(&self) -> usize {
        self.node_id_width
    }

    #[must_use]
    pub fn slug_collision_policy(&self) -> SlugCollisionPolicy {
        self.slug_collision_policy
    }
}
