//! Duplicate detection
//!
//! A payload matches an existing entry when its serialized markup is
//! byte-for-byte identical to the entry's stored content. Matching is
//! markup identity, not semantic equivalence: case, attribute order, and
//! incidental wrapper elements all distinguish payloads. Absence of a match
//! is the normal "new entry required" outcome, never an error.

use crate::dom;
use crate::extract::Payload;
use markup5ever_rcdom::Handle;

/// Search `destination` for an entry holding the same payload.
///
/// Entries are scanned in ordinal order and the first (lowest-ordinal) match
/// wins. Returns the matched entry's index among the destination's entries
/// together with its `<li>` handle.
pub fn find_match(payload: &Payload, destination: &Handle) -> Option<(usize, Handle)> {
    let candidate = payload.markup();

    let mut index = 0;
    for child in destination.children.borrow().iter() {
        if !dom::is_tag(child, "li") {
            continue;
        }
        let Some(content) = entry_content(child) else {
            continue;
        };
        let stored = dom::serialize_nodes(&content.children.borrow());
        if stored == candidate {
            return Some((index, child.clone()));
        }
        index += 1;
    }
    None
}

/// The `span.footnoteContent` child of an entry, if the `<li>` is one of
/// ours. Foreign list items in a reused destination are skipped.
fn entry_content(entry: &Handle) -> Option<Handle> {
    entry
        .children
        .borrow()
        .iter()
        .find(|c| dom::is_tag(c, "span") && dom::has_class(c, "footnoteContent"))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{append, create_element, create_text};
    use crate::extract::Payload;

    fn entry_with(markup_text: &str) -> Handle {
        let li = create_element("li", &[]);
        let group = create_element("span", &[("class", "footnoteBackReferenceGroup")]);
        append(&li, group);
        let content = create_element("span", &[("class", "footnoteContent")]);
        append(&content, create_text(markup_text));
        append(&li, content);
        li
    }

    #[test]
    fn test_first_match_wins() {
        let dest = create_element("ol", &[]);
        append(&dest, entry_with("alpha"));
        append(&dest, entry_with("beta"));
        append(&dest, entry_with("beta"));

        let payload = Payload::new(vec![create_text("beta")]);
        let (index, entry) = find_match(&payload, &dest).expect("match found");
        assert_eq!(index, 1);
        assert!(std::rc::Rc::ptr_eq(&entry, &dest.children.borrow()[1]));
    }

    #[test]
    fn test_no_match_is_normal() {
        let dest = create_element("ol", &[]);
        append(&dest, entry_with("alpha"));

        let payload = Payload::new(vec![create_text("gamma")]);
        assert!(find_match(&payload, &dest).is_none());
    }

    #[test]
    fn test_markup_identity_not_text_identity() {
        let dest = create_element("ol", &[]);
        append(&dest, entry_with("note"));

        // Same visible text, different structure: no match.
        let wrapped = create_element("span", &[]);
        append(&wrapped, create_text("note"));
        let payload = Payload::new(vec![wrapped]);
        assert!(find_match(&payload, &dest).is_none());
    }
}
