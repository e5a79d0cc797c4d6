use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::content_saver::markdown_converter::RenderedPage;
use crate::crawl_engine::{CrawlError, CrawlResult, SlugCollision};
use crate::link_index::NodeId;

/// Result of writing one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Absolute (or output-root based) path of the written file
    pub path: PathBuf,
    /// Set when this run already wrote the same file for another node
    pub collision: Option<SlugCollision>,
}

/// Writes rendered pages of one library directory and notices when two
/// different nodes land in the same file.
#[derive(Debug)]
pub struct MarkdownWriter {
    output_root: PathBuf,
    directory: String,
    written: HashMap<PathBuf, NodeId>,
}

impl MarkdownWriter {
    /// # Arguments
    ///
    /// * `output_root` - Root of the Markdown corpus
    /// * `directory` - Library subdirectory below the root
    pub fn new(output_root: impl Into<PathBuf>, directory: impl Into<String>) -> Self {
        Self {
            output_root: output_root.into(),
            directory: directory.into(),
            written: HashMap::new(),
        }
    }

    /// `<directory>/<slug>.md`, relative to the output root
    #[must_use]
    pub fn relative_path(&self, slug: &str) -> PathBuf {
        Path::new(&self.directory).join(format!("{slug}.md"))
    }

    /// Save a rendered page as `<output_root>/<directory>/<slug>.md`.
    ///
    /// An existing file is overwritten. If this writer already wrote that
    /// file for a different node, the overwrite is logged and reported.
    pub async fn write(&mut self, slug: &str, page: &RenderedPage) -> CrawlResult<WriteOutcome> {
        let relative = self.relative_path(slug);
        let path = self.output_root.join(&relative);

        let parent = path.parent().unwrap_or(&self.output_root).to_path_buf();
        tokio::fs::create_dir_all(&parent)
            .await
            .map_err(|source| CrawlError::Io {
                path: parent.clone(),
                source,
            })?;

        tokio::fs::write(&path, page.markdown.as_bytes())
            .await
            .map_err(|source| CrawlError::Io {
                path: path.clone(),
                source,
            })?;

        let collision = match self.written.insert(relative.clone(), page.id.clone()) {
            Some(previous) if previous != page.id => {
                log::warn!(
                    "{} was written for node {} and is now overwritten by node {}",
                    relative.display(),
                    previous,
                    page.id
                );
                Some(SlugCollision {
                    path: relative,
                    first: previous,
                    second: page.id.clone(),
                })
            }
            _ => None,
        };

        log::debug!(
            "Saved markdown for node {} ({}) to {}",
            page.id,
            page.title,
            path.display()
        );

        Ok(WriteOutcome { path, collision })
    }

    /// Number of distinct files written so far
    #[must_use]
    pub fn files_written(&self) -> usize {
        self.written.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn page(id: &str, markdown: &str) -> RenderedPage {
        RenderedPage {
            id: id.into(),
            title: id.to_string(),
            markdown: markdown.to_string(),
            discovered: Vec::new(),
        }
    }

    #[tokio::test]
    async fn writes_into_library_directory() {
        let temp = TempDir::new().unwrap();
        let mut writer = MarkdownWriter::new(temp.path(), "lib");

        let outcome = writer.write("FooBar", &page("0100", "hello\n")).await.unwrap();

        assert_eq!(outcome.path, temp.path().join("lib/FooBar.md"));
        assert_eq!(std::fs::read_to_string(&outcome.path).unwrap(), "hello\n");
        assert!(outcome.collision.is_none());
    }

    #[tokio::test]
    async fn reports_overwrite_by_another_node() {
        let temp = TempDir::new().unwrap();
        let mut writer = MarkdownWriter::new(temp.path(), "lib");

        writer.write("Same", &page("0100", "first")).await.unwrap();
        let again = writer.write("Same", &page("0100", "first again")).await.unwrap();
        assert!(again.collision.is_none());

        let other = writer.write("Same", &page("0200", "second")).await.unwrap();
        let collision = other.collision.expect("collision reported");
        assert_eq!(collision.path, PathBuf::from("lib/Same.md"));
        assert_eq!(collision.first, NodeId::from("0100"));
        assert_eq!(collision.second, NodeId::from("0200"));
        assert_eq!(writer.files_written(), 1);
    }
}
