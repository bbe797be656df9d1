//! Destination placement and sharing
//!
//! One list per processed block by default, a single shared list when
//! configured, and pre-existing containers are reused as-is.

use footnotes::{process_html, Options, SelectorList};

fn blocks() -> SelectorList {
    SelectorList::parse("div.article").expect("block selector parses")
}

const TWO_GROUPS: &str = "<div class=\"article\"><p>\
                          <span class=\"footnote\">(first group note)</span></p></div>\
                          <div class=\"article\"><p>\
                          <span class=\"footnote\">(second group note)</span></p></div>";

#[test]
fn test_one_list_per_group_by_default() {
    let html = process_html(TWO_GROUPS, &blocks(), &Options::default()).expect("pass succeeds");

    assert!(html.contains("<ol id=\"autoFootnotes0\""));
    assert!(html.contains("<ol id=\"autoFootnotes1\""));
    // each group numbers from [1] and scopes entry ids by group
    assert!(html.contains("<li id=\"cite-text-0-0\""));
    assert!(html.contains("<li id=\"cite-text-1-0\""));
    assert_eq!(html.matches(">[1]</a>").count(), 2);
}

#[test]
fn test_single_destination_is_shared_in_group_order() {
    let opts = Options {
        single_destination: true,
        ..Options::default()
    };
    let html = process_html(TWO_GROUPS, &blocks(), &opts).expect("pass succeeds");

    assert_eq!(html.matches("<ol id=\"autoFootnotes\"").count(), 1);
    assert!(!html.contains("autoFootnotes0"));
    // the second group's entry lands after the first and is numbered second
    assert!(html.contains(">[2]</a>"));
    let first = html.find("cite-text-0-0").expect("first entry present");
    let second = html.find("cite-text-1-0").expect("second entry present");
    assert!(first < second);
}

#[test]
fn test_shared_destination_deduplicates_across_groups() {
    let source = "<div class=\"article\"><p>\
                  <span class=\"footnote\">(shared note)</span></p></div>\
                  <div class=\"article\"><p>\
                  <span class=\"footnote\">(shared note)</span></p></div>";
    let opts = Options {
        single_destination: true,
        ..Options::default()
    };
    let html = process_html(source, &blocks(), &opts).expect("pass succeeds");

    assert_eq!(html.matches("<li id=\"cite-text-").count(), 1);
    // the repeat is attributed to the second group against entry 0
    assert!(html.contains("id=\"cite-ref-1-0-1\""));
    assert!(html.contains("<sup>a</sup>"));
    assert!(html.contains(">b</a>"));
}

#[test]
fn test_preexisting_container_is_reused_as_is() {
    let source = "<div class=\"article\"><p>\
                  <span class=\"footnote\">(note)</span></p>\
                  <ul id=\"autoFootnotes0\" class=\"custom\"></ul></div>";
    let html = process_html(source, &blocks(), &Options::default()).expect("pass succeeds");

    assert!(html.contains("<ul id=\"autoFootnotes0\" class=\"custom\"><li id=\"cite-text-0-0\">"));
    assert!(!html.contains("footnotesList"));
    assert!(!html.contains("<ol"));
}

#[test]
fn test_missing_anchor_falls_back_to_group_root() {
    // no .content block anywhere: the list is appended to the group root
    let html = process_html(
        "<div class=\"article\"><p><span class=\"footnote\">(note)</span></p></div>",
        &blocks(),
        &Options::default(),
    )
    .expect("pass succeeds");

    assert!(html.contains("</p><ol id=\"autoFootnotes0\" class=\"footnotesList\">"));
}
