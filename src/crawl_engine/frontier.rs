//! Crawl frontier: which pages are rendered at which depth.
//!
//! Depth 1 is the target library's index. Every later depth consists of the
//! node links discovered at the previous depth that were never scheduled
//! before, in first-discovered order.

use std::collections::HashSet;

use crate::link_index::{LibraryIndex, NodeId};
use crate::utils::{fallback_slug, normalize_name};

/// A page scheduled for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierItem {
    pub id: NodeId,
    /// Title used for the rendered page
    pub title: String,
    /// Output file stem
    pub slug: String,
}

impl FrontierItem {
    /// Page reached through a link rather than listed in the index
    #[must_use]
    pub fn discovered(id: NodeId) -> Self {
        let slug = fallback_slug(id.as_str());
        Self {
            title: slug.clone(),
            slug,
            id,
        }
    }
}

/// Pending pages of the current depth plus everything ever scheduled.
#[derive(Debug, Clone)]
pub struct Frontier {
    depth: u8,
    items: Vec<FrontierItem>,
    visited: HashSet<NodeId>,
}

impl Frontier {
    /// Depth 1: every index entry of `library`, in index order.
    #[must_use]
    pub fn seed(library: &LibraryIndex) -> Self {
        let items: Vec<FrontierItem> = library
            .entries()
            .iter()
            .map(|entry| FrontierItem {
                id: entry.id.clone(),
                title: entry.name.clone(),
                slug: library
                    .slug(&entry.id)
                    .map_or_else(|| normalize_name(&entry.name), str::to_string),
            })
            .collect();
        let visited = items.iter().map(|item| item.id.clone()).collect();

        Self {
            depth: 1,
            items,
            visited,
        }
    }

    #[must_use]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    #[must_use]
    pub fn items(&self) -> &[FrontierItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn is_visited(&self, id: &NodeId) -> bool {
        self.visited.contains(id)
    }

    /// Move to the next depth given the links each page of this depth
    /// discovered, in rendering order.
    pub fn advance(&mut self, discovered_per_page: &[Vec<NodeId>]) {
        let next = next_frontier(&self.visited, discovered_per_page);
        self.visited.extend(next.iter().cloned());
        self.items = next.into_iter().map(FrontierItem::discovered).collect();
        self.depth = self.depth.saturating_add(1);
    }
}

/// Ids of the next depth: discovered ids in first-seen order, without
/// duplicates and without anything already scheduled.
///
/// Pure function of its inputs, so recomputing it from the same rendering
/// results always yields the same ordered set.
#[must_use]
pub fn next_frontier(visited: &HashSet<NodeId>, discovered_per_page: &[Vec<NodeId>]) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    discovered_per_page
        .iter()
        .flatten()
        .filter(|id| !visited.contains(*id))
        .filter(|id| seen.insert(*id))
        .cloned()
        .collect()
}
