//! Classification of raw page lines.
//!
//! The manual's pages follow a fixed line grammar: body markers, section
//! headings on their own line, and inline anchors. [`classify_line`] turns a
//! raw line into a [`LineKind`] so the renderer only decides what to do in
//! each state, not what a line is.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Anchor markup, tried left to right at each position:
/// 1. link to a node page, closed on the same line
/// 2. named anchor (link target definition)
/// 3. any other opening anchor tag
/// 4. closing tag
static ANCHOR_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<a href="[^"]*?/?node([^"/]*?)\.html(?:#line\d+)?">(.*?)</a>|<a name="[^"]*">|<a\b[^>]*>|</a>"#,
    )
    .expect("valid anchor token regex")
});

pub const BODY_START_MARKER: &str = "BODY=START";
pub const BODY_END_MARKER: &str = "BODY=END";

/// Section headings recognized on a line of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionHeading {
    Name,
    Synopsis,
    Function,
    Warning,
    Inputs,
    Results,
    SeeAlso,
}

impl SectionHeading {
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Synopsis,
        Self::Function,
        Self::Warning,
        Self::Inputs,
        Self::Results,
        Self::SeeAlso,
    ];

    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::Synopsis => "SYNOPSIS",
            Self::Function => "FUNCTION",
            Self::Warning => "WARNING",
            Self::Inputs => "INPUTS",
            Self::Results => "RESULTS",
            Self::SeeAlso => "SEE ALSO",
        }
    }

    /// Heading whose keyword is exactly `line`
    #[must_use]
    pub fn from_line(line: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|heading| heading.keyword() == line)
    }

    /// Emphasized Markdown form, `**KEYWORD**`
    #[must_use]
    pub fn emphasized(self) -> String {
        format!("**{}**", self.keyword())
    }
}

/// One piece of anchor markup inside a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor<'a> {
    /// Byte range of the markup in the line
    pub span: Range<usize>,
    pub kind: AnchorKind<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorKind<'a> {
    /// `<a href=".../node<ID>.html">inner</a>`
    Link {
        /// Raw node id from the href
        target: &'a str,
        /// Everything between the tags
        inner: &'a str,
    },
    /// `<a name="...">`
    Named,
    /// Opening tag of an anchor that is not a node link
    OtherOpen,
    /// `</a>`
    Close,
}

impl<'a> Anchor<'a> {
    /// Visible text of a node link whose content is plain text.
    ///
    /// Links wrapping further markup have no usable text and are not
    /// rewritten.
    #[must_use]
    pub fn link_text(&self) -> Option<&'a str> {
        match self.kind {
            AnchorKind::Link { inner, .. } if !inner.contains('<') => Some(inner),
            _ => None,
        }
    }

    #[must_use]
    pub fn link_target(&self) -> Option<&'a str> {
        match self.kind {
            AnchorKind::Link { target, .. } => Some(target),
            _ => None,
        }
    }
}

/// What a raw line is, independent of renderer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    BodyStart,
    BodyEnd,
    Heading(SectionHeading),
    /// Line containing anchor markup, tokens in line order
    Anchored(Vec<Anchor<'a>>),
    Plain,
}

/// Classify one raw line (without its line terminator).
#[must_use]
pub fn classify_line(line: &str) -> LineKind<'_> {
    if line.contains(BODY_END_MARKER) {
        return LineKind::BodyEnd;
    }
    if line.contains(BODY_START_MARKER) {
        return LineKind::BodyStart;
    }
    if let Some(heading) = SectionHeading::from_line(line) {
        return LineKind::Heading(heading);
    }

    let anchors = tokenize_anchors(line);
    if anchors.is_empty() {
        return LineKind::Plain;
    }
    match heading_without_dropped_tags(line, &anchors) {
        Some(heading) => LineKind::Heading(heading),
        None => LineKind::Anchored(anchors),
    }
}

/// Heading left once named anchors and closing tags, which never render,
/// are removed from the line.
fn heading_without_dropped_tags(line: &str, anchors: &[Anchor<'_>]) -> Option<SectionHeading> {
    if !anchors
        .iter()
        .all(|anchor| matches!(anchor.kind, AnchorKind::Named | AnchorKind::Close))
    {
        return None;
    }

    let mut bare = String::with_capacity(line.len());
    let mut last = 0;
    for anchor in anchors {
        bare.push_str(&line[last..anchor.span.start]);
        last = anchor.span.end;
    }
    bare.push_str(&line[last..]);
    SectionHeading::from_line(&bare)
}

/// All anchor markup of a line, in order and non-overlapping.
#[must_use]
pub fn tokenize_anchors(line: &str) -> Vec<Anchor<'_>> {
    ANCHOR_TOKEN_RE
        .captures_iter(line)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let kind = if let (Some(target), Some(inner)) = (caps.get(1), caps.get(2)) {
                AnchorKind::Link {
                    target: target.as_str(),
                    inner: inner.as_str(),
                }
            } else if whole.as_str() == "</a>" {
                AnchorKind::Close
            } else if whole.as_str().starts_with("<a name=") {
                AnchorKind::Named
            } else {
                AnchorKind::OtherOpen
            };
            Some(Anchor {
                span: whole.range(),
                kind,
            })
        })
        .collect()
}
