pub mod config;
pub mod content_saver;
pub mod crawl_engine;
pub mod link_index;
pub mod link_rewriter;
pub mod page_fetcher;
pub mod utils;

pub use config::{LibrarySpec, ManualConfig, SlugCollisionPolicy};
pub use content_saver::markdown_converter::{RenderedPage, render_page};
pub use content_saver::{MarkdownWriter, WriteOutcome};
pub use crawl_engine::{
    CrawlError, CrawlResult, CrawlSummary, LogProgress, NoOpProgress, ProgressReporter,
    RenderedFile, SlugCollision, convert_manual, crawl_library,
};
pub use link_index::{
    LibraryIndex, LinkEntry, NodeId, ResolutionContext, build_resolution_context,
    parse_index_page,
};
pub use link_rewriter::{LinkResolver, ResolutionTier, ResolvedLink};
pub use page_fetcher::{FetchError, HttpPageSource, PageSource, StaticPageSource};
pub use utils::normalize_name;

/// Convert the configured manual over HTTP, logging progress.
pub async fn convert(config: ManualConfig) -> CrawlResult<CrawlSummary> {
    let source = HttpPageSource::from_config(&config)?;
    convert_manual(&config, &source, &LogProgress).await
}
