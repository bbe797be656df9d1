//! Extractor behavior over parsed markup
//!
//! Exercises the default extraction rules against markers that came out of
//! the HTML parser, as they do in a real pass.

use footnotes::dom;
use footnotes::{DefaultExtractor, Extract, SelectorList};
use markup5ever_rcdom::Handle;
use rstest::rstest;

/// Parse a document and hand back the first marker-shaped element.
fn parse_marker(source: &str) -> Handle {
    let dom = dom::parse_html(source).expect("document parses");
    let markers = SelectorList::parse("blockquote[title], span.footnote, blockquote[cite]")
        .expect("selector parses");
    let marker = markers
        .collect(&dom.document)
        .into_iter()
        .next()
        .expect("document contains a marker");
    // Keep the parsed document alive for the returned marker's lifetime.
    // Dropping the RcDom tears down the whole tree — Node's Drop drains every
    // descendant's children to avoid deep recursion — which would detach the
    // marker's content before the extractor reads it. A real pass holds the
    // document open through extraction (see processor::run).
    std::mem::forget(dom);
    marker
}

#[rstest]
#[case("(hello world)", "hello world")]
#[case("prefix (kept) suffix", "prefix (kept) suffix")]
#[case(" (padded) ", "padded")]
#[case("\u{a0}(nbsp padded)\u{a0}", "nbsp padded")]
#[case("(keeps (inner) pairs)", "keeps (inner) pairs")]
#[case("(multi\nline)", "multi\nline")]
#[case("no parentheses at all", "no parentheses at all")]
fn test_span_text_normalization(#[case] input: &str, #[case] expected: &str) {
    let marker = parse_marker(&format!("<span class=\"footnote\">{}</span>", input));
    let payload = DefaultExtractor.extract(&marker).expect("span extracts");
    assert_eq!(payload.text(), expected);
}

#[test]
fn test_span_is_left_empty() {
    let marker = parse_marker("<span class=\"footnote\">(gone)</span>");
    DefaultExtractor.extract(&marker).expect("span extracts");
    assert!(marker.children.borrow().is_empty());
}

#[test]
fn test_structured_span_content_survives_stripping() {
    let marker =
        parse_marker("<span class=\"footnote\">(see <em>the appendix</em> for more)</span>");
    let payload = DefaultExtractor.extract(&marker).expect("span extracts");
    assert_eq!(payload.markup(), "see <em>the appendix</em> for more");
}

#[test]
fn test_titled_blockquote_with_cite_links_title() {
    let marker = parse_marker(
        "<blockquote title=\"Author, 2008\" cite=\"http://example.org/a\"><p>q</p></blockquote>",
    );
    let payload = DefaultExtractor.extract(&marker).expect("blockquote extracts");
    assert_eq!(
        payload.markup(),
        "<a href=\"http://example.org/a\">Author, 2008</a>"
    );
    // plain titles keep their tooltip
    assert_eq!(dom::get_attr(&marker, "title").as_deref(), Some("Author, 2008"));
}

#[test]
fn test_titled_blockquote_without_cite_is_plain() {
    let marker = parse_marker("<blockquote title=\"Note\"><p>q</p></blockquote>");
    let payload = DefaultExtractor.extract(&marker).expect("blockquote extracts");
    assert_eq!(payload.markup(), "Note");
}

#[test]
fn test_structured_title_renders_after_citation_link() {
    let marker = parse_marker(
        "<blockquote title=\"See <b>Author</b>\" cite=\"http://x\"><p>q</p></blockquote>",
    );
    let payload = DefaultExtractor.extract(&marker).expect("blockquote extracts");
    assert_eq!(
        payload.markup(),
        "<span><a href=\"http://x\">http://x</a>: See <b>Author</b></span>"
    );
    // the raw markup must not show up as a native tooltip
    assert_eq!(dom::get_attr(&marker, "title").as_deref(), Some(""));
}

#[test]
fn test_citation_only_blockquote() {
    let marker = parse_marker("<blockquote cite=\"http://x\"><p>q</p></blockquote>");
    let payload = DefaultExtractor.extract(&marker).expect("blockquote extracts");
    assert_eq!(payload.markup(), "<a href=\"http://x\">http://x</a>");
}

#[test]
fn test_selector_precedence_prefers_span_rules() {
    // a footnote-classed span with a title attribute is still a span marker
    let marker = parse_marker("<span class=\"footnote\" title=\"ignored\">(content)</span>");
    let payload = DefaultExtractor.extract(&marker).expect("span extracts");
    assert_eq!(payload.text(), "content");
}
