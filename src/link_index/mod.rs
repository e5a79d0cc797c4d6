//! Library index for link resolution.
//!
//! Every configured library has one summary page listing its entries as
//! anchors to `node<ID>.html`. This module parses those pages and builds the
//! immutable [`ResolutionContext`] that the link resolver consults:
//! - per library: entry id → slug
//! - across libraries: entry id → slug
//!
//! The context is built once, before any page is rendered, and only read
//! afterwards.

use std::collections::{HashMap, HashSet};
use std::collections::hash_map::Entry;
use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{LibrarySpec, ManualConfig, SlugCollisionPolicy};
use crate::crawl_engine::{CrawlError, CrawlResult, ProgressReporter, SlugCollision};
use crate::link_rewriter::LinkResolver;
use crate::page_fetcher::PageSource;
use crate::utils::normalize_name;

/// Index entry anchors. Trailing `(`/`)` before `</a>` belong to function
/// names like `AllocMem()` and are not part of the entry name.
static INDEX_ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"node([^"/.]+?)\.html">(.*?)\(?\)?</a>"#).expect("valid index entry regex")
});

/// Marker preceding the index listing; everything before it is navigation.
const LISTING_START: &str = "<pre>";

/// Identifier of one page of the manual, verbatim from `node<ID>.html`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Zero-pad a purely numeric id to `width` digits; other ids are kept.
    #[must_use]
    pub fn padded(self, width: usize) -> Self {
        if !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit()) {
            Self(format!("{:0>width$}", self.0))
        } else {
            self
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for NodeId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// One anchor of an index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    pub id: NodeId,
    /// Display name as listed, not yet normalized
    pub name: String,
}

/// Extract the entries of one index page in document order.
///
/// Content before the first `<pre>` is ignored. Ids are unique in the result;
/// a repeated id keeps its first name.
#[must_use]
pub fn parse_index_page(html: &str) -> Vec<LinkEntry> {
    let listing = html.find(LISTING_START).map_or(html, |start| &html[start..]);

    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for caps in INDEX_ENTRY_RE.captures_iter(listing) {
        let (Some(id), Some(name)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        if !seen.insert(id.as_str()) {
            log::debug!("Index lists node {} twice, keeping first name", id.as_str());
            continue;
        }
        entries.push(LinkEntry {
            id: NodeId::from(id.as_str()),
            name: name.as_str().to_string(),
        });
    }

    entries
}

/// Parsed index of one library.
#[derive(Debug, Clone)]
pub struct LibraryIndex {
    spec: LibrarySpec,
    entries: Vec<LinkEntry>,
    slugs: HashMap<NodeId, String>,
    collisions: Vec<SlugCollision>,
}

impl LibraryIndex {
    /// Assign slugs to `entries`, detecting entries whose names normalize
    /// to the same slug.
    #[must_use]
    pub fn new(spec: LibrarySpec, entries: Vec<LinkEntry>, policy: SlugCollisionPolicy) -> Self {
        let directory = spec.directory();
        let mut slugs = HashMap::with_capacity(entries.len());
        let mut owners: HashMap<String, NodeId> = HashMap::new();
        let mut collisions = Vec::new();

        for entry in &entries {
            let slug = normalize_name(&entry.name);
            let slug = match owners.entry(slug.clone()) {
                Entry::Vacant(vacant) => {
                    vacant.insert(entry.id.clone());
                    slug
                }
                Entry::Occupied(occupied) => {
                    let first = occupied.get().clone();
                    log::warn!(
                        "Library '{}': nodes {} and {} both normalize to '{}'",
                        spec.name,
                        first,
                        entry.id,
                        slug
                    );
                    collisions.push(SlugCollision {
                        path: PathBuf::from(&directory).join(format!("{slug}.md")),
                        first,
                        second: entry.id.clone(),
                    });
                    match policy {
                        SlugCollisionPolicy::Overwrite => slug,
                        SlugCollisionPolicy::SuffixNodeId => format!("{slug}_{}", entry.id),
                    }
                }
            };
            slugs.insert(entry.id.clone(), slug);
        }

        Self {
            spec,
            entries,
            slugs,
            collisions,
        }
    }

    #[must_use]
    pub fn spec(&self) -> &LibrarySpec {
        &self.spec
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    #[must_use]
    pub fn entries(&self) -> &[LinkEntry] {
        &self.entries
    }

    /// Slug of an entry of this library
    #[must_use]
    pub fn slug(&self, id: &NodeId) -> Option<&str> {
        self.slugs.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.slugs.contains_key(id)
    }

    /// Slug collisions detected while indexing
    #[must_use]
    pub fn collisions(&self) -> &[SlugCollision] {
        &self.collisions
    }
}

/// Everything the link resolver consults, frozen after index building.
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    libraries: Vec<LibraryIndex>,
    global: HashMap<NodeId, String>,
}

impl ResolutionContext {
    /// Build a context from parsed libraries, in resolution order.
    ///
    /// When two libraries list the same id, the global map keeps the later
    /// library's slug while ownership lookups still find the earlier library.
    #[must_use]
    pub fn new(libraries: Vec<LibraryIndex>) -> Self {
        let mut global = HashMap::new();
        for library in &libraries {
            for (id, slug) in &library.slugs {
                global.insert(id.clone(), slug.clone());
            }
        }
        Self { libraries, global }
    }

    #[must_use]
    pub fn libraries(&self) -> &[LibraryIndex] {
        &self.libraries
    }

    #[must_use]
    pub fn library(&self, name: &str) -> Option<&LibraryIndex> {
        self.libraries.iter().find(|library| library.name() == name)
    }

    /// Slug of `id` in the cross-library map
    #[must_use]
    pub fn global_slug(&self, id: &NodeId) -> Option<&str> {
        self.global.get(id).map(String::as_str)
    }

    /// First library, in configured order, that lists `id`
    #[must_use]
    pub fn owner_of(&self, id: &NodeId) -> Option<&LibraryIndex> {
        self.libraries.iter().find(|library| library.contains(id))
    }

    /// Resolver for pages rendered on behalf of library `name`
    #[must_use]
    pub fn resolver_for(&self, name: &str) -> Option<LinkResolver<'_>> {
        self.library(name)
            .map(|current| LinkResolver::new(self, current))
    }

    /// All index-time slug collisions across libraries
    pub fn collisions(&self) -> impl Iterator<Item = &SlugCollision> {
        self.libraries.iter().flat_map(|library| library.collisions.iter())
    }
}

/// Fetch and parse every configured library's index page, in configured
/// order. Any fetch failure aborts the run.
pub async fn build_resolution_context<S: PageSource>(
    config: &ManualConfig,
    source: &S,
    progress: &dyn ProgressReporter,
) -> CrawlResult<ResolutionContext> {
    let mut libraries = Vec::with_capacity(config.libraries().len());

    for spec in config.libraries() {
        log::info!("Collecting links of {} (node {})", spec.name, spec.seed);

        let html = source
            .fetch(&spec.seed)
            .await
            .map_err(|source| CrawlError::Fetch {
                id: spec.seed.clone(),
                source,
            })?;

        let entries = parse_index_page(&html);
        if entries.is_empty() {
            log::warn!("Index page of '{}' lists no entries", spec.name);
        }
        progress.report_index_loaded(&spec.name, entries.len());

        libraries.push(LibraryIndex::new(
            spec.clone(),
            entries,
            config.slug_collision_policy(),
        ));
    }

    Ok(ResolutionContext::new(libraries))
}
