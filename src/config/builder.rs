//! Type-safe builder for `ManualConfig` using the typestate pattern
//!
//! This module provides a fluent builder interface with compile-time validation
//! ensuring that the output root and the target library are set before
//! building a `ManualConfig`.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use url::Url;

use super::types::{LibrarySpec, ManualConfig, SlugCollisionPolicy, default_libraries};
use crate::crawl_engine::{CrawlError, CrawlResult};
use crate::utils::NODE_ID_PLACEHOLDER;

// Type states for the builder
pub struct WithOutputRoot;
pub struct Complete;

pub struct ManualConfigBuilder<State = ()> {
    pub(crate) output_root: Option<PathBuf>,
    pub(crate) page_url_template: String,
    pub(crate) source_encoding: String,
    pub(crate) libraries: Vec<LibrarySpec>,
    pub(crate) target_library: Option<String>,
    pub(crate) max_depth: Option<u8>,
    pub(crate) request_timeout_secs: u64,
    pub(crate) max_retries: u8,
    pub(crate) retry_base_delay_ms: u64,
    pub(crate) crawl_rate_rps: Option<f64>,
    pub(crate) node_id_width: usize,
    pub(crate) slug_collision_policy: SlugCollisionPolicy,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ManualConfigBuilder<()> {
    fn default() -> Self {
        let defaults = ManualConfig::default();
        Self {
            output_root: None,
            page_url_template: defaults.page_url_template,
            source_encoding: defaults.source_encoding,
            // Empty means "use the built-in library set" at build time
            libraries: Vec::new(),
            target_library: None,
            max_depth: defaults.max_depth,
            request_timeout_secs: defaults.request_timeout_secs,
            max_retries: defaults.max_retries,
            retry_base_delay_ms: defaults.retry_base_delay_ms,
            crawl_rate_rps: defaults.crawl_rate_rps,
            node_id_width: defaults.node_id_width,
            slug_collision_policy: defaults.slug_collision_policy,
            _phantom: PhantomData,
        }
    }
}

impl<State> ManualConfigBuilder<State> {
    fn into_state<Next>(self) -> ManualConfigBuilder<Next> {
        ManualConfigBuilder {
            output_root: self.output_root,
            page_url_template: self.page_url_template,
            source_encoding: self.source_encoding,
            libraries: self.libraries,
            target_library: self.target_library,
            max_depth: self.max_depth,
            request_timeout_secs: self.request_timeout_secs,
            max_retries: self.max_retries,
            retry_base_delay_ms: self.retry_base_delay_ms,
            crawl_rate_rps: self.crawl_rate_rps,
            node_id_width: self.node_id_width,
            slug_collision_policy: self.slug_collision_policy,
            _phantom: PhantomData,
        }
    }
}

impl ManualConfig {
    /// Create a builder for configuring a `ManualConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ManualConfigBuilder<()> {
        ManualConfigBuilder::default()
    }

    /// Turn an existing configuration back into a complete builder, e.g. to
    /// apply command line overrides on top of a configuration file.
    #[must_use]
    pub fn into_builder(self) -> ManualConfigBuilder<Complete> {
        ManualConfigBuilder {
            output_root: Some(self.output_root),
            page_url_template: self.page_url_template,
            source_encoding: self.source_encoding,
            libraries: self.libraries,
            target_library: Some(self.target_library),
            max_depth: self.max_depth,
            request_timeout_secs: self.request_timeout_secs,
            max_retries: self.max_retries,
            retry_base_delay_ms: self.retry_base_delay_ms,
            crawl_rate_rps: self.crawl_rate_rps,
            node_id_width: self.node_id_width,
            slug_collision_policy: self.slug_collision_policy,
            _phantom: PhantomData,
        }
    }

    /// Load a configuration from a JSON file and validate it.
    ///
    /// Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> CrawlResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| CrawlError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| {
            CrawlError::Config(format!("invalid config file {}: {e}", path.display()))
        })?;
        config.into_builder().build()
    }
}

impl ManualConfigBuilder<()> {
    pub fn output_root(self, dir: impl Into<PathBuf>) -> ManualConfigBuilder<WithOutputRoot> {
        let mut next = self.into_state();
        next.output_root = Some(dir.into());
        next
    }
}

impl ManualConfigBuilder<WithOutputRoot> {
    pub fn target_library(self, name: impl Into<String>) -> ManualConfigBuilder<Complete> {
        let mut next = self.into_state();
        next.target_library = Some(name.into());
        next
    }
}

// Build and overrides only available when all required fields are set
impl ManualConfigBuilder<Complete> {
    #[must_use]
    pub fn replace_output_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_root = Some(dir.into());
        self
    }

    #[must_use]
    pub fn replace_target_library(mut self, name: impl Into<String>) -> Self {
        self.target_library = Some(name.into());
        self
    }

    pub fn build(self) -> CrawlResult<ManualConfig> {
        let output_root = self
            .output_root
            .ok_or_else(|| CrawlError::Config("output_root is required".into()))?;
        let target_library = self
            .target_library
            .ok_or_else(|| CrawlError::Config("target_library is required".into()))?;

        validate_url_template(&self.page_url_template)?;

        if encoding_rs::Encoding::for_label(self.source_encoding.as_bytes()).is_none() {
            return Err(CrawlError::Config(format!(
                "unknown source encoding '{}'",
                self.source_encoding
            )));
        }

        if let Some(rate) = self.crawl_rate_rps
            && !(rate.is_finite() && rate > 0.0)
        {
            return Err(CrawlError::Config(format!(
                "crawl_rate_rps must be a positive number, got {rate}"
            )));
        }

        if self.max_depth == Some(0) {
            return Err(CrawlError::Config(
                "max_depth must be at least 1 (use no limit for an exhaustive crawl)".into(),
            ));
        }

        let libraries = if self.libraries.is_empty() {
            default_libraries()
        } else {
            self.libraries
        };
        let libraries: Vec<LibrarySpec> = libraries
            .into_iter()
            .map(|mut library| {
                library.seed = library.seed.padded(self.node_id_width);
                library
            })
            .collect();

        let mut seen = std::collections::HashSet::new();
        for library in &libraries {
            if !seen.insert(library.name.as_str()) {
                return Err(CrawlError::Config(format!(
                    "library '{}' is configured twice",
                    library.name
                )));
            }
        }

        if !libraries.iter().any(|l| l.name == target_library) {
            return Err(CrawlError::UnknownLibrary(target_library));
        }

        Ok(ManualConfig {
            output_root,
            page_url_template: self.page_url_template,
            source_encoding: self.source_encoding,
            libraries,
            target_library,
            max_depth: self.max_depth,
            request_timeout_secs: self.request_timeout_secs,
            max_retries: self.max_retries,
            retry_base_delay_ms: self.retry_base_delay_ms,
            crawl_rate_rps: self.crawl_rate_rps,
            node_id_width: self.node_id_width,
            slug_collision_policy: self.slug_collision_policy,
        })
    }
}

/// The template must contain the id placeholder and expand to an http(s) URL.
fn validate_url_template(template: &str) -> CrawlResult<()> {
    if !template.contains(NODE_ID_PLACEHOLDER) {
        return Err(CrawlError::Config(format!(
            "page_url_template '{template}' has no {NODE_ID_PLACEHOLDER} placeholder"
        )));
    }

    let sample = template.replace(NODE_ID_PLACEHOLDER, "0000");
    let parsed = Url::parse(&sample)
        .map_err(|e| CrawlError::Config(format!("invalid page_url_template '{template}': {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(CrawlError::Config(format!(
            "page_url_template must use http or https, not '{other}'"
        ))),
    }
}
