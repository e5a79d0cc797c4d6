//! Tiered link resolution.
//!
//! Decides which local Markdown file a hyperlink found in a page should point
//! to. Resolution never fails: a target that cannot be tied to a named entry
//! falls back to an id-keyed reference that may or may not exist on disk.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::link_index::{LibraryIndex, NodeId, ResolutionContext};
use crate::utils::{fallback_slug, normalize_name};

/// `exec.library/AllocMem` style link text of older pages.
static LEGACY_LIBRARY_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)\.library/(.*)$").expect("valid legacy library text regex")
});

/// Which rule produced a link target, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResolutionTier {
    /// Entry of the library being rendered
    Local,
    /// Entry of another configured library
    Foreign,
    /// Derived from `<lib>.library/<entry>` link text
    LegacyText,
    /// Id-keyed reference not tied to a named entry
    Fallback,
}

/// A resolved relative reference, always ending in `.md`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub tier: ResolutionTier,
    pub target: String,
}

impl fmt::Display for ResolvedLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.target)
    }
}

/// Resolves link targets on behalf of one library.
#[derive(Debug, Clone, Copy)]
pub struct LinkResolver<'a> {
    context: &'a ResolutionContext,
    current: &'a LibraryIndex,
}

impl<'a> LinkResolver<'a> {
    #[must_use]
    pub fn new(context: &'a ResolutionContext, current: &'a LibraryIndex) -> Self {
        Self { context, current }
    }

    /// Resolve an anchor's raw target id and visible text.
    ///
    /// Tiers are tried strictly in order, first match wins:
    /// 1. id is an entry of the current library
    /// 2. id is an entry of any configured library (first owner in order)
    /// 3. text reads `<lib>.library/<entry>`
    /// 4. `_<id>`
    #[must_use]
    pub fn resolve(&self, raw_id: &str, text: &str) -> ResolvedLink {
        let id = NodeId::new(normalize_name(raw_id));

        if let Some(slug) = self.current.slug(&id) {
            return ResolvedLink::new(ResolutionTier::Local, slug.to_string());
        }

        if self.context.global_slug(&id).is_some()
            && let Some(owner) = self.context.owner_of(&id)
            && let Some(slug) = owner.slug(&id)
        {
            // The directory is used as configured so links match the files written
            let path = format!("../{}/{slug}", owner.spec().directory());
            return ResolvedLink::new(ResolutionTier::Foreign, path);
        }

        let bare_text = strip_parens(text);
        if let Some(caps) = LEGACY_LIBRARY_TEXT_RE.captures(&bare_text) {
            let path = normalize_name(&format!("../{}/{}", &caps[1], &caps[2]));
            return ResolvedLink::new(ResolutionTier::LegacyText, path);
        }

        log::debug!("No entry for node {id}, using fallback reference");
        ResolvedLink::new(ResolutionTier::Fallback, fallback_slug(id.as_str()))
    }
}

impl ResolvedLink {
    fn new(tier: ResolutionTier, stem: String) -> Self {
        Self {
            tier,
            target: format!("{stem}.md"),
        }
    }
}

/// Link text with every parenthesis removed, as used for inline links.
#[must_use]
pub fn strip_parens(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '(' | ')')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LibrarySpec, SlugCollisionPolicy};
    use crate::link_index::LinkEntry;

    fn library(name: &str, entries: &[(&str, &str)]) -> LibraryIndex {
        LibraryIndex::new(
            LibrarySpec::new(name, "0000"),
            entries
                .iter()
                .map(|(id, name)| LinkEntry {
                    id: NodeId::from(*id),
                    name: name.to_string(),
                })
                .collect(),
            SlugCollisionPolicy::Overwrite,
        )
    }

    fn context() -> ResolutionContext {
        ResolutionContext::new(vec![
            library("graphics", &[("0100", "Init Bit Map"), ("0300", "Shared")]),
            library("exec lib", &[("0200", "Alloc Mem"), ("0300", "Also Shared")]),
        ])
    }

    #[test]
    fn local_entry_wins() {
        let context = context();
        let resolver = context.resolver_for("graphics").unwrap();
        let link = resolver.resolve("0100", "InitBitMap()");
        assert_eq!(link.tier, ResolutionTier::Local);
        assert_eq!(link.target, "InitBitMap.md");
    }

    #[test]
    fn local_entry_beats_foreign_owner() {
        let context = context();
        let resolver = context.resolver_for("exec lib").unwrap();
        assert_eq!(resolver.resolve("0300", "x").target, "AlsoShared.md");
    }

    #[test]
    fn foreign_entry_points_into_owning_directory() {
        let context = context();
        let resolver = context.resolver_for("graphics").unwrap();
        let link = resolver.resolve("0200", "AllocMem()");
        assert_eq!(link.tier, ResolutionTier::Foreign);
        assert_eq!(link.target, "../execlib/AllocMem.md");
    }

    #[test]
    fn foreign_link_uses_configured_directory_verbatim() {
        let exec = LibraryIndex::new(
            LibrarySpec::new("exec", "0002").with_directory("exec lib"),
            vec![LinkEntry {
                id: "0200".into(),
                name: "Alloc Mem".into(),
            }],
            SlugCollisionPolicy::Overwrite,
        );
        let context = ResolutionContext::new(vec![library("graphics", &[]), exec]);
        let resolver = context.resolver_for("graphics").unwrap();
        assert_eq!(resolver.resolve("0200", "AllocMem()").target, "../exec lib/AllocMem.md");
    }

    #[test]
    fn legacy_text_builds_path_from_text() {
        let context = context();
        let resolver = context.resolver_for("graphics").unwrap();
        let link = resolver.resolve("0999", "(dos.library/Open Lock)");
        assert_eq!(link.tier, ResolutionTier::LegacyText);
        assert_eq!(link.target, "../dos/OpenLock.md");
    }

    #[test]
    fn unknown_id_falls_back_to_id_reference() {
        let context = context();
        let resolver = context.resolver_for("graphics").unwrap();
        let link = resolver.resolve("0999", "Baz");
        assert_eq!(link.tier, ResolutionTier::Fallback);
        assert_eq!(link.target, "_0999.md");
    }

    #[test]
    fn known_id_ignores_legacy_text() {
        let context = context();
        let resolver = context.resolver_for("graphics").unwrap();
        let link = resolver.resolve("0200", "dos.library/Open");
        assert_eq!(link.tier, ResolutionTier::Foreign);
    }
}
