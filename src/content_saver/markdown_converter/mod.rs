//! Manual page to Markdown conversion.
//!
//! Pages of the manual are preformatted text with a small, fixed line
//! grammar, so conversion is line based rather than DOM based:
//! 1. [`line_classifier`] tells what each raw line is
//! 2. [`page_renderer`] runs the body/code-block state machine over those lines
//! 3. [`legacy_entities`] decodes the entities used inside code listings
//!
//! # Usage
//! ```rust
//! # use nodescrape::config::{LibrarySpec, SlugCollisionPolicy};
//! # use nodescrape::link_index::{LibraryIndex, ResolutionContext};
//! # use nodescrape::content_saver::markdown_converter::render_page;
//! let context = ResolutionContext::new(vec![LibraryIndex::new(
//!     LibrarySpec::new("lib", "0001"),
//!     Vec::new(),
//!     SlugCollisionPolicy::Overwrite,
//! )]);
//! let resolver = context.resolver_for("lib").unwrap();
//! let html = "BODY=START\nNAME\n  see <a href=\"g/node0200.html\">Baz</a>\nBODY=END\n";
//! let page = render_page("0100".into(), "Foo".into(), html, &resolver);
//! assert_eq!(page.markdown, "**NAME**\n\nsee [Baz](_0200.md)\n");
//! ```

pub mod legacy_entities;
pub mod line_classifier;
pub mod page_renderer;

pub use legacy_entities::decode_legacy_entities;
pub use line_classifier::{Anchor, AnchorKind, LineKind, SectionHeading, classify_line};
pub use page_renderer::{PageRenderer, RenderState, RenderedPage, render_page};
