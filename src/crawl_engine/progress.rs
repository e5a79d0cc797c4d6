//! Progress reporting abstraction for conversion runs
//!
//! Defines the `ProgressReporter` trait for lifecycle event reporting
//! and provides a no-op and a logging implementation.

use std::path::Path;

use super::crawl_types::{CrawlSummary, SlugCollision};
use crate::link_index::NodeId;

/// Trait for reporting run progress at key lifecycle events
///
/// Implementations can send updates to channels, log to console, update UI, etc.
pub trait ProgressReporter: Send + Sync {
    /// Report that a library's index page was parsed
    fn report_index_loaded(&self, library: &str, entries: usize);

    /// Report that rendering of a crawl level has started
    fn report_depth_started(&self, depth: u8, pages: usize);

    /// Report that a page was rendered and written
    fn report_page_rendered(&self, id: &NodeId, path: &Path);

    /// Report that two pages map to the same output file
    fn report_collision(&self, collision: &SlugCollision);

    /// Report that the run has completed successfully
    fn report_completed(&self, summary: &CrawlSummary);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_index_loaded(&self, _library: &str, _entries: usize) {}

    #[inline(always)]
    fn report_depth_started(&self, _depth: u8, _pages: usize) {}

    #[inline(always)]
    fn report_page_rendered(&self, _id: &NodeId, _path: &Path) {}

    #[inline(always)]
    fn report_collision(&self, _collision: &SlugCollision) {}

    #[inline(always)]
    fn report_completed(&self, _summary: &CrawlSummary) {}
}

/// Progress reporter emitting `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report_index_loaded(&self, library: &str, entries: usize) {
        tracing::info!(library, entries, "index loaded");
    }

    fn report_depth_started(&self, depth: u8, pages: usize) {
        tracing::info!(depth, pages, "rendering crawl level");
    }

    fn report_page_rendered(&self, id: &NodeId, path: &Path) {
        tracing::debug!(node = %id, path = %path.display(), "page written");
    }

    fn report_collision(&self, collision: &SlugCollision) {
        tracing::warn!(
            path = %collision.path.display(),
            first = %collision.first,
            second = %collision.second,
            "slug collision"
        );
    }

    fn report_completed(&self, summary: &CrawlSummary) {
        tracing::info!(
            library = %summary.library,
            pages = summary.pages_rendered(),
            unrendered = summary.unrendered.len(),
            collisions = summary.collisions.len(),
            "conversion finished"
        );
    }
}
