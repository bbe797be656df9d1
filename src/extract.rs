//! Payload extraction
//!
//! Turns a marker node into the normalized footnote payload and mutates the
//! marker into its consumed form. Extraction is a pluggable strategy so that
//! callers overriding the marker selectors can supply matching extraction
//! rules; [`DefaultExtractor`] implements the stock behavior for
//! `span.footnote`, `blockquote[title]`, and `blockquote[cite]` markers.

use crate::dom;
use markup5ever_rcdom::Handle;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// The entire visible text is parenthesized, allowing leading/trailing
/// whitespace or no-break spaces. `(?s)` lets the inner content span line
/// breaks.
static WRAPPING_PARENS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?:\x{A0}|\s)*\((.+)\)(?:\x{A0}|\s)*$")
        .expect("wrapping-parens regex is valid")
});

/// Normalized footnote content extracted from one marker.
///
/// The payload owns its content fragment. Two payloads are considered the
/// same footnote when their serialized markup is byte-for-byte identical;
/// the plain-text form is only used for link titles.
pub struct Payload {
    nodes: Vec<Handle>,
}

impl Payload {
    pub fn new(nodes: Vec<Handle>) -> Payload {
        Payload { nodes }
    }

    /// The content fragment, consumed when the payload is placed into an
    /// entry.
    pub fn into_nodes(self) -> Vec<Handle> {
        self.nodes
    }

    /// Serialized markup used for duplicate detection.
    pub fn markup(&self) -> String {
        dom::serialize_nodes(&self.nodes)
    }

    /// Plain-text rendering used for forward-reference titles.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            out.push_str(&dom::text_content(node));
        }
        out
    }
}

/// Extraction strategy: produce the payload for a marker and leave the
/// marker in its consumed state.
///
/// `None` means no extraction rule applied to the marker; the orchestrator
/// skips such markers with a warning.
pub trait Extract {
    fn extract(&self, marker: &Handle) -> Option<Payload>;
}

/// Stock extraction rules, checked in order: footnote-classed spans, then
/// title-bearing blockquotes, then citation-only blockquotes.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultExtractor;

impl Extract for DefaultExtractor {
    fn extract(&self, marker: &Handle) -> Option<Payload> {
        if dom::is_tag(marker, "span") && dom::has_class(marker, "footnote") {
            return Some(extract_span(marker));
        }
        if dom::is_tag(marker, "blockquote") {
            if let Some(title) = dom::get_attr(marker, "title") {
                return Some(extract_titled_blockquote(marker, &title));
            }
            if let Some(cite) = dom::get_attr(marker, "cite") {
                return Some(Payload::new(vec![link(&cite, &cite)]));
            }
        }
        None
    }
}

/// Span markers carry their footnote inline, usually parenthesized so the
/// page degrades gracefully without scripting. The parentheses are stripped
/// when they wrap the whole visible text, then the span's children become
/// the payload and the span is left empty as a pure anchor point.
fn extract_span(marker: &Handle) -> Payload {
    let full_text = dom::text_content(marker);
    if let Some(captures) = WRAPPING_PARENS_RE.captures(&full_text) {
        let inner = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        strip_wrapping_parens(marker, inner);
    }
    Payload::new(dom::take_children(marker))
}

fn strip_wrapping_parens(marker: &Handle, inner: &str) {
    let children = marker.children.borrow().clone();

    if children.len() == 1 && dom::is_text(&children[0]) {
        dom::set_text(&children[0], inner);
        return;
    }

    // Only the outermost parenthesis characters are trimmed: the first `(`
    // scanning text children forward, the last `)` scanning backward.
    for child in children.iter().filter(|c| dom::is_text(c)) {
        let text = dom::text_content(child);
        if let Some(pos) = text.find('(') {
            dom::set_text(child, &text[pos + 1..]);
            break;
        }
    }
    for child in children.iter().rev().filter(|c| dom::is_text(c)) {
        let text = dom::text_content(child);
        if let Some(pos) = text.rfind(')') {
            dom::set_text(child, &text[..pos]);
            break;
        }
    }
}

/// Title-bearing blockquotes become citation-style footnotes. A plain title
/// labels the citation link directly; a title carrying markup is rendered
/// after the link, and the title attribute is cleared so the raw markup
/// never shows up in a native tooltip.
fn extract_titled_blockquote(marker: &Handle, title: &str) -> Payload {
    let cite = dom::get_attr(marker, "cite").filter(|c| !c.is_empty());
    let Some(cite) = cite else {
        return Payload::new(vec![dom::create_text(title)]);
    };

    let title_nodes = match dom::parse_snippet(title) {
        Ok(nodes) => nodes,
        Err(e) => {
            warn!("title attribute did not parse, treating as plain text: {}", e);
            Vec::new()
        }
    };

    if title_nodes.iter().any(dom::is_element) {
        let wrapper = dom::create_element("span", &[]);
        dom::append(&wrapper, link(&cite, &cite));
        dom::append(&wrapper, dom::create_text(": "));
        for node in title_nodes {
            dom::append(&wrapper, node);
        }
        dom::set_attr(marker, "title", "");
        Payload::new(vec![wrapper])
    } else {
        Payload::new(vec![link(&cite, title)])
    }
}

fn link(href: &str, label: &str) -> Handle {
    let anchor = dom::create_element("a", &[("href", href)]);
    dom::append(&anchor, dom::create_text(label));
    anchor
}
