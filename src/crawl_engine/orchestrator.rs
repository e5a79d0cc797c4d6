//! Run orchestration: index building, then depth-by-depth rendering.
//!
//! Everything is sequential and deterministic: libraries are indexed in
//! configured order, index entries are rendered in index order, and later
//! depths in first-discovered order.

use chrono::Utc;

use super::crawl_types::{CrawlError, CrawlResult, CrawlSummary, RenderedFile, SlugCollision};
use super::frontier::Frontier;
use super::progress::ProgressReporter;
use crate::config::ManualConfig;
use crate::content_saver::MarkdownWriter;
use crate::content_saver::markdown_converter::render_page;
use crate::link_index::{ResolutionContext, build_resolution_context};
use crate::page_fetcher::PageSource;

/// Index every configured library, then render the target library.
pub async fn convert_manual<S: PageSource>(
    config: &ManualConfig,
    source: &S,
    progress: &dyn ProgressReporter,
) -> CrawlResult<CrawlSummary> {
    let context = build_resolution_context(config, source, progress).await?;
    crawl_library(config, &context, source, progress).await
}

/// Render the target library's pages and the pages they link to, up to the
/// configured depth, writing one Markdown file per page.
///
/// Any fetch or write failure aborts the run; files already written stay.
pub async fn crawl_library<S: PageSource>(
    config: &ManualConfig,
    context: &ResolutionContext,
    source: &S,
    progress: &dyn ProgressReporter,
) -> CrawlResult<CrawlSummary> {
    let started_at = Utc::now();
    let target = config.target_library();
    let library = context
        .library(target)
        .ok_or_else(|| CrawlError::UnknownLibrary(target.to_string()))?;
    let resolver = context
        .resolver_for(target)
        .ok_or_else(|| CrawlError::UnknownLibrary(target.to_string()))?;

    let mut writer = MarkdownWriter::new(config.output_root(), library.spec().directory());
    let mut frontier = Frontier::seed(library);
    let mut files = Vec::new();
    let mut unrendered = Vec::new();

    let mut collisions: Vec<SlugCollision> = Vec::new();
    for collision in context.collisions() {
        progress.report_collision(collision);
        collisions.push(collision.clone());
    }

    while !frontier.is_empty() {
        let depth = frontier.depth();
        log::info!("Rendering {} page(s) at depth {depth}", frontier.len());
        progress.report_depth_started(depth, frontier.len());

        let mut discovered = Vec::with_capacity(frontier.len());

        for item in frontier.items() {
            log::info!("Rendering node {} as {}", item.id, item.slug);

            let html = source
                .fetch(&item.id)
                .await
                .map_err(|source| CrawlError::Fetch {
                    id: item.id.clone(),
                    source,
                })?;

            let page = render_page(item.id.clone(), item.title.clone(), &html, &resolver);
            let outcome = writer.write(&item.slug, &page).await?;

            if let Some(collision) = outcome.collision
                && !collisions.contains(&collision)
            {
                progress.report_collision(&collision);
                collisions.push(collision);
            }

            progress.report_page_rendered(&page.id, &outcome.path);
            files.push(RenderedFile {
                id: page.id,
                path: outcome.path,
                depth,
            });
            discovered.push(page.discovered);
        }

        frontier.advance(&discovered);

        if config.max_depth().is_some_and(|max| frontier.depth() > max) {
            unrendered = frontier.items().iter().map(|item| item.id.clone()).collect();
            if !unrendered.is_empty() {
                log::info!(
                    "Depth limit reached, {} discovered page(s) left unrendered",
                    unrendered.len()
                );
            }
            break;
        }
    }

    let summary = CrawlSummary {
        library: target.to_string(),
        started_at,
        finished_at: Utc::now(),
        files,
        unrendered,
        collisions,
    };
    progress.report_completed(&summary);
    Ok(summary)
}
