//! Crawl Engine Module
//!
//! This module contains the run orchestration: the crawl frontier deciding
//! which pages are rendered, the request pacer, progress reporting and the
//! error and summary types shared by every stage.

// Sub-modules
pub mod crawl_types;
pub mod frontier;
pub mod orchestrator;
pub mod progress;
pub mod rate_limiter;

// Re-exports for public API
pub use orchestrator::{convert_manual, crawl_library};
pub use progress::{LogProgress, NoOpProgress, ProgressReporter};

// Re-export rate limiter types
pub use rate_limiter::{RateLimitDecision, RequestPacer};

// Re-export frontier types
pub use frontier::{Frontier, FrontierItem, next_frontier};

// Re-export crawl types
pub use crawl_types::{CrawlError, CrawlResult, CrawlSummary, RenderedFile, SlugCollision};
