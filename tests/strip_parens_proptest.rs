//! Property-based tests for parenthesis stripping
//!
//! The normalization only ever removes one wrapping pair; anything that is
//! not fully parenthesized passes through untouched.

use footnotes::dom::{append, create_element, create_text};
use footnotes::{DefaultExtractor, Extract};
use proptest::prelude::*;

fn extract_text(span_text: &str) -> String {
    let span = create_element("span", &[("class", "footnote")]);
    append(&span, create_text(span_text));
    DefaultExtractor
        .extract(&span)
        .expect("span markers always extract")
        .text()
}

proptest! {
    #[test]
    fn fully_wrapped_text_loses_exactly_the_parens(inner in "[a-zA-Z0-9 .,]{1,60}") {
        let wrapped = format!("({})", inner);
        prop_assert_eq!(extract_text(&wrapped), inner);
    }

    #[test]
    fn surrounding_whitespace_does_not_defeat_stripping(
        inner in "[a-z]{1,30}",
        pad in "[ \u{a0}]{0,4}",
    ) {
        let wrapped = format!("{pad}({inner}){pad}");
        prop_assert_eq!(extract_text(&wrapped), inner);
    }

    #[test]
    fn leading_text_prevents_stripping(
        prefix in "[a-z]{1,10}",
        inner in "[a-z ]{1,30}",
    ) {
        let text = format!("{prefix} ({inner})");
        prop_assert_eq!(extract_text(&text), text.clone());
    }
}
