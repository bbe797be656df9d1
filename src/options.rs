//! Recognized option surface
//!
//! Which nodes are footnote sources, where their forward links attach, where
//! the consolidated list lives, and how it is rendered.

use crate::error::FootnoteError;
use crate::extract::{DefaultExtractor, Extract};
use crate::selector::SelectorList;
use std::fmt;

pub const DEFAULT_MARKERS: &str = "blockquote[title], span.footnote, blockquote[cite]";
pub const DEFAULT_PREPEND: &str = "blockquote";
pub const DEFAULT_DESTINATION_ID: &str = "autoFootnotes";
pub const DEFAULT_CONTENT_ANCHOR: &str = ".content";
pub const DEFAULT_MARKER_CLASS: &str = "autoFootnote";

/// Options for one consolidation pass.
pub struct Options {
    /// Which nodes are treated as footnote sources. Overriding this usually
    /// calls for overriding `extractor` as well.
    pub markers: SelectorList,

    /// Subset of markers whose forward link is prepended into the marker
    /// rather than inserted after it. Useful when appended `<sup>` tags
    /// would break `:last-child`-style styling inside blockquotes.
    pub prepend: SelectorList,

    /// One shared footnote list for all groups, or one list per group.
    pub single_destination: bool,

    /// Base id for the generated or located footnote list. Per-group lists
    /// get the group index appended.
    pub destination_id: String,

    /// Where inside a group a newly created list is appended. An empty list
    /// means the group root itself.
    pub content_anchor: SelectorList,

    /// Reserved class name for footnote processing. Marker order is computed
    /// up front, so the pass never writes this class into user content, but
    /// the name is kept out of user hands to stay collision-free.
    pub marker_class: String,

    /// Extraction strategy applied to each marker.
    pub extractor: Box<dyn Extract>,

    /// Numbered (`<ol>`) vs. unnumbered (`<ul>`) footnote container.
    pub ordered_list: bool,

    /// Enables diagnostic output for the pass.
    pub debug: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            markers: parse_default(DEFAULT_MARKERS),
            prepend: parse_default(DEFAULT_PREPEND),
            single_destination: false,
            destination_id: DEFAULT_DESTINATION_ID.to_string(),
            content_anchor: parse_default(DEFAULT_CONTENT_ANCHOR),
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
            extractor: Box::new(DefaultExtractor),
            ordered_list: true,
            debug: false,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("markers", &self.markers.to_string())
            .field("prepend", &self.prepend.to_string())
            .field("single_destination", &self.single_destination)
            .field("destination_id", &self.destination_id)
            .field("content_anchor", &self.content_anchor.to_string())
            .field("marker_class", &self.marker_class)
            .field("ordered_list", &self.ordered_list)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

fn parse_default(input: &str) -> SelectorList {
    // Built-in selector strings are part of the recognized grammar.
    SelectorList::parse(input).expect("built-in selector list parses")
}

impl Options {
    /// Replace the marker selector list from its string form.
    pub fn set_markers(&mut self, input: &str) -> Result<(), FootnoteError> {
        self.markers = SelectorList::parse(input)?;
        Ok(())
    }

    /// Replace the prepend selector list from its string form.
    pub fn set_prepend(&mut self, input: &str) -> Result<(), FootnoteError> {
        self.prepend = SelectorList::parse(input)?;
        Ok(())
    }

    /// Replace the content-anchor selector list from its string form.
    pub fn set_content_anchor(&mut self, input: &str) -> Result<(), FootnoteError> {
        self.content_anchor = SelectorList::parse(input)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let opts = Options::default();
        assert_eq!(opts.markers.to_string(), DEFAULT_MARKERS);
        assert_eq!(opts.prepend.to_string(), DEFAULT_PREPEND);
        assert!(!opts.single_destination);
        assert_eq!(opts.destination_id, "autoFootnotes");
        assert_eq!(opts.content_anchor.to_string(), ".content");
        assert_eq!(opts.marker_class, "autoFootnote");
        assert!(opts.ordered_list);
        assert!(!opts.debug);
    }

    #[test]
    fn test_selector_setters_reject_bad_input() {
        let mut opts = Options::default();
        assert!(opts.set_markers("aside[data-note]").is_ok());
        assert!(opts.set_markers("p ~ span").is_err());
    }
}
