//! Destination resolution
//!
//! Locates or creates the list element that collects a group's footnote
//! entries. An element that already carries the target id is reused as-is,
//! whatever its tag, so pages can pre-place their footnote container.

use crate::dom;
use crate::options::Options;
use markup5ever_rcdom::{Handle, RcDom};
use tracing::debug;

/// The id the destination for `group_index` must carry.
pub fn destination_id(group_index: usize, opts: &Options) -> String {
    if opts.single_destination {
        opts.destination_id.clone()
    } else {
        format!("{}{}", opts.destination_id, group_index)
    }
}

/// Locate or create the destination for one group.
///
/// Created lists are appended to the group's content anchor, falling back to
/// the group root when no anchor matches. Callers memoize the handle per
/// group, which keeps repeated resolution idempotent within a pass.
pub fn resolve(dom: &RcDom, group_root: &Handle, group_index: usize, opts: &Options) -> Handle {
    let id = destination_id(group_index, opts);

    if let Some(existing) = dom::find_by_id(&dom.document, &id) {
        if opts.debug {
            debug!("reusing existing #{} as footnote destination", id);
        }
        return existing;
    }

    if opts.debug {
        debug!("no #{} found; adding our own for group {}", id, group_index + 1);
    }

    let tag = if opts.ordered_list { "ol" } else { "ul" };
    let list = dom::create_element(tag, &[("id", &id), ("class", "footnotesList")]);

    let anchor = opts
        .content_anchor
        .find_first(group_root)
        .unwrap_or_else(|| group_root.clone());
    dom::append(&anchor, list.clone());
    list
}
