//! Line-oriented page renderer.
//!
//! Walks one page's raw HTML line by line and emits Markdown:
//! - only lines between the body markers are rendered
//! - section headings become emphasized standalone lines
//! - the SYNOPSIS section is wrapped in a fenced C code block, closed at the
//!   next section heading or at the end of the body
//! - node links are rewritten through the [`LinkResolver`]; inside the code
//!   block they are collected into a trailing `Links:` line instead
//!
//! Every node link target is also recorded for crawl discovery, whether or
//! not it could be resolved to a named entry.

use std::collections::HashSet;

use super::legacy_entities::decode_legacy_entities;
use super::line_classifier::{Anchor, AnchorKind, LineKind, SectionHeading, classify_line};
use crate::link_index::NodeId;
use crate::link_rewriter::{LinkResolver, strip_parens};

const CODE_FENCE_OPEN: &str = "```c\n";
const CODE_FENCE_CLOSE: &str = "```\n";
const LINKS_PREFIX: &str = "Links: ";

/// Renderer state; `InCodeBlock` only occurs inside the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    OutsideBody,
    InBody,
    InCodeBlock,
    /// Body end seen, remaining lines are ignored
    Finished,
}

/// Output of rendering one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub id: NodeId,
    pub title: String,
    pub markdown: String,
    /// Node link targets in first-seen order, without duplicates
    pub discovered: Vec<NodeId>,
}

/// State machine rendering one document.
pub struct PageRenderer<'r> {
    resolver: LinkResolver<'r>,
    state: RenderState,
    markdown: String,
    discovered: Vec<NodeId>,
    seen: HashSet<NodeId>,
    /// `[text](target)` links collected inside the open code block
    pending_links: Vec<String>,
}

impl<'r> PageRenderer<'r> {
    #[must_use]
    pub fn new(resolver: LinkResolver<'r>) -> Self {
        Self {
            resolver,
            state: RenderState::OutsideBody,
            markdown: String::new(),
            discovered: Vec::new(),
            seen: HashSet::new(),
            pending_links: Vec::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Feed one raw line without its terminator.
    pub fn feed_line(&mut self, line: &str) {
        let kind = classify_line(line);

        match (self.state, kind) {
            (RenderState::Finished, _) => {}
            (RenderState::OutsideBody, LineKind::BodyStart) => self.state = RenderState::InBody,
            (RenderState::OutsideBody, _) => {}
            (_, LineKind::BodyEnd) => {
                self.close_code_block();
                self.state = RenderState::Finished;
            }
            // A repeated start marker is still a marker, not content
            (_, LineKind::BodyStart) => {}
            (_, LineKind::Heading(heading)) => self.emit_heading(heading),
            (_, LineKind::Anchored(anchors)) => {
                let rendered = self.render_anchors(line, &anchors);
                self.emit_text(&rendered);
            }
            (_, LineKind::Plain) => self.emit_text(line),
        }
    }

    /// Finish the document, closing a code block left open at end of input.
    #[must_use]
    pub fn finish(mut self, id: NodeId, title: String) -> RenderedPage {
        self.close_code_block();
        RenderedPage {
            id,
            title,
            markdown: self.markdown,
            discovered: self.discovered,
        }
    }

    fn emit_heading(&mut self, heading: SectionHeading) {
        // A new section ends the synopsis code block
        self.close_code_block();

        self.markdown.push_str(&heading.emphasized());
        self.markdown.push_str("\n\n");

        if heading == SectionHeading::Synopsis {
            self.markdown.push_str(CODE_FENCE_OPEN);
            self.state = RenderState::InCodeBlock;
        }
    }

    fn emit_text(&mut self, text: &str) {
        if self.state == RenderState::InCodeBlock {
            self.markdown.push_str(&decode_legacy_entities(text));
        } else {
            self.markdown.push_str(text.trim_start());
        }
        self.markdown.push('\n');
    }

    fn close_code_block(&mut self) {
        if self.state != RenderState::InCodeBlock {
            return;
        }
        self.markdown.push_str(CODE_FENCE_CLOSE);
        if !self.pending_links.is_empty() {
            // Every link is followed by a space, the last one included
            self.markdown.push_str(LINKS_PREFIX);
            for link in self.pending_links.drain(..) {
                self.markdown.push_str(&link);
                self.markdown.push(' ');
            }
            self.markdown.push_str("\n\n");
        }
        self.state = RenderState::InBody;
    }

    /// Rebuild a line with its anchor markup replaced.
    fn render_anchors(&mut self, line: &str, anchors: &[Anchor<'_>]) -> String {
        let in_code = self.state == RenderState::InCodeBlock;

        for target in anchors.iter().filter_map(Anchor::link_target) {
            let id = NodeId::from(target);
            if self.seen.insert(id.clone()) {
                self.discovered.push(id);
            }
        }

        let mut out = String::with_capacity(line.len());
        let mut last = 0;

        for anchor in anchors {
            out.push_str(&line[last..anchor.span.start]);
            last = anchor.span.end;

            match (&anchor.kind, anchor.link_text()) {
                (AnchorKind::Link { target, .. }, Some(text)) => {
                    let link = self.resolver.resolve(target, text);
                    if in_code {
                        out.push_str(text);
                        self.pending_links.push(format!("[{text}]({link})"));
                    } else {
                        out.push_str(&format!("[{}]({link})", strip_parens(text)));
                    }
                }
                (AnchorKind::Link { inner, .. }, None) => {
                    if in_code {
                        out.push_str(inner);
                    } else {
                        // Closing tag is dropped like every other `</a>`
                        let open_end = anchor.span.len() - inner.len() - "</a>".len();
                        out.push_str(&line[anchor.span.start..anchor.span.start + open_end]);
                        out.push_str(inner);
                    }
                }
                (AnchorKind::OtherOpen, _) if !in_code => {
                    out.push_str(&line[anchor.span.clone()]);
                }
                (AnchorKind::Named | AnchorKind::OtherOpen | AnchorKind::Close, _) => {}
            }
        }
        out.push_str(&line[last..]);
        out
    }
}

/// Render one document's raw HTML.
#[must_use]
pub fn render_page(
    id: NodeId,
    title: String,
    html: &str,
    resolver: &LinkResolver<'_>,
) -> RenderedPage {
    let mut renderer = PageRenderer::new(*resolver);
    for line in html.lines() {
        renderer.feed_line(line);
        if renderer.state() == RenderState::Finished {
            break;
        }
    }
    renderer.finish(id, title)
}
