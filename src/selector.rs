//! Marker selector model
//!
//! The configuration surface identifies markers, prepend targets, and content
//! anchors with comma-separated simple selectors. The recognized grammar is
//! deliberately small (`tag`, `.class`, `tag.class`, `tag[attr]`), which is
//! everything the footnote defaults and their documented overrides use. A
//! selector list is parsed once and matched against element handles; an empty
//! list matches nothing.

use crate::dom;
use crate::error::FootnoteError;
use markup5ever_rcdom::Handle;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static SELECTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z][a-zA-Z0-9-]*)?(?:\.([A-Za-z_][A-Za-z0-9_-]*))?(?:\[([A-Za-z_][A-Za-z0-9_-]*)\])?$")
        .expect("selector grammar regex is valid")
});

/// One simple selector: any combination of tag name, class, and attribute
/// presence. At least one component is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    class: Option<String>,
    attr: Option<String>,
}

impl Selector {
    /// Parse a single selector such as `span.footnote` or `blockquote[title]`.
    pub fn parse(input: &str) -> Result<Selector, FootnoteError> {
        let trimmed = input.trim();
        let captures = SELECTOR_RE
            .captures(trimmed)
            .ok_or_else(|| FootnoteError::InvalidSelector(input.to_string()))?;

        let selector = Selector {
            tag: captures.get(1).map(|m| m.as_str().to_ascii_lowercase()),
            class: captures.get(2).map(|m| m.as_str().to_string()),
            attr: captures.get(3).map(|m| m.as_str().to_ascii_lowercase()),
        };
        if selector.tag.is_none() && selector.class.is_none() && selector.attr.is_none() {
            return Err(FootnoteError::InvalidSelector(input.to_string()));
        }
        Ok(selector)
    }

    /// Whether an element node satisfies every component of this selector.
    pub fn matches(&self, node: &Handle) -> bool {
        if !dom::is_element(node) {
            return false;
        }
        if let Some(tag) = &self.tag {
            if !dom::is_tag(node, tag) {
                return false;
            }
        }
        if let Some(class) = &self.class {
            if !dom::has_class(node, class) {
                return false;
            }
        }
        if let Some(attr) = &self.attr {
            if dom::get_attr(node, attr).is_none() {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            write!(f, "{tag}")?;
        }
        if let Some(class) = &self.class {
            write!(f, ".{class}")?;
        }
        if let Some(attr) = &self.attr {
            write!(f, "[{attr}]")?;
        }
        Ok(())
    }
}

/// A comma-separated list of simple selectors, matched as a union.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectorList(Vec<Selector>);

impl SelectorList {
    /// Parse a comma-separated selector list. The empty string parses to an
    /// empty list, which matches nothing (used for "no content anchor").
    pub fn parse(input: &str) -> Result<SelectorList, FootnoteError> {
        if input.trim().is_empty() {
            return Ok(SelectorList(Vec::new()));
        }
        let selectors = input
            .split(',')
            .map(Selector::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SelectorList(selectors))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any selector in the list matches the node.
    pub fn matches(&self, node: &Handle) -> bool {
        self.0.iter().any(|s| s.matches(node))
    }

    /// First matching element in document order under `root`, excluding
    /// `root` itself.
    pub fn find_first(&self, root: &Handle) -> Option<Handle> {
        if self.is_empty() {
            return None;
        }
        let mut found = None;
        dom::walk(root, &mut |node| {
            if found.is_none() && !std::rc::Rc::ptr_eq(node, root) && self.matches(node) {
                found = Some(node.clone());
            }
        });
        found
    }

    /// All matching elements in document order under `root`, including
    /// `root` itself.
    pub fn collect(&self, root: &Handle) -> Vec<Handle> {
        let mut matches = Vec::new();
        if self.is_empty() {
            return matches;
        }
        dom::walk(root, &mut |node| {
            if self.matches(node) {
                matches.push(node.clone());
            }
        });
        matches
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for selector in &self.0 {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{selector}")?;
            first = false;
        }
        Ok(())
    }
}
