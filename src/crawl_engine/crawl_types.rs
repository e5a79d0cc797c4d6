//! Core types for conversion runs.
//!
//! This module contains the error type shared by every stage of a run and
//! the serializable summary a finished run produces.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::link_index::NodeId;
use crate::page_fetcher::FetchError;

/// Fatal errors of a conversion run.
///
/// Per-line anomalies (unresolvable links, malformed anchors, undecodable
/// bytes) are never errors; they degrade inside the renderer.
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The target library is not among the configured libraries
    #[error("Unknown library '{0}'")]
    UnknownLibrary(String),

    /// A page could not be fetched (after retries)
    #[error("Failed to fetch node {id}: {source}")]
    Fetch {
        id: NodeId,
        #[source]
        source: FetchError,
    },

    /// A Markdown file or directory could not be written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for Result with `CrawlError`
pub type CrawlResult<T> = Result<T, CrawlError>;

/// Two different pages were mapped to the same output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugCollision {
    pub path: PathBuf,
    pub first: NodeId,
    pub second: NodeId,
}

/// One Markdown file written during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedFile {
    pub id: NodeId,
    pub path: PathBuf,
    /// Crawl level, 1 for index entries
    pub depth: u8,
}

/// Outcome of a complete run, printable as JSON by the CLI
#[derive(Debug, Clone, Serialize)]
pub struct CrawlSummary {
    pub library: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub files: Vec<RenderedFile>,
    /// Ids discovered at the last permitted depth and left unrendered
    pub unrendered: Vec<NodeId>,
    pub collisions: Vec<SlugCollision>,
}

impl CrawlSummary {
    #[must_use]
    pub fn pages_rendered(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn files_at_depth(&self, depth: u8) -> impl Iterator<Item = &RenderedFile> {
        self.files.iter().filter(move |file| file.depth == depth)
    }
}
