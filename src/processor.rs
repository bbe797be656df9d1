//! Pass orchestration
//!
//! Drives one consolidation pass: each block handed in is an independent
//! group. Markers are discovered up front as an explicit ordered list (the
//! tree is never tagged with a transient class), the group's destination is
//! resolved lazily on the first marker, and every marker is dispatched to
//! extraction, duplicate matching, and link building in document order.

use crate::dedupe;
use crate::destination;
use crate::dom;
use crate::error::FootnoteError;
use crate::links;
use crate::options::Options;
use crate::selector::SelectorList;
use markup5ever_rcdom::{Handle, RcDom};
use tracing::{debug, warn};

/// Run one consolidation pass over the given group blocks.
///
/// Completion is implicit: the observable effect is the mutated tree. A
/// group without markers is a no-op and creates no destination.
pub fn consolidate(dom: &RcDom, blocks: &[Handle], opts: &Options) {
    for (group_index, block) in blocks.iter().enumerate() {
        if opts.debug {
            debug!("building footnotes for group {}", group_index + 1);
        }
        process_group(dom, block, group_index, opts);
        if opts.debug {
            debug!("done building footnotes for group {}", group_index + 1);
        }
    }
}

/// Convenience pipeline: parse, consolidate over every `blocks` match, and
/// serialize the whole document back out.
pub fn process_html(
    source: &str,
    blocks: &SelectorList,
    opts: &Options,
) -> Result<String, FootnoteError> {
    let dom = dom::parse_html(source)?;
    let roots = blocks.collect(&dom.document);
    consolidate(&dom, &roots, opts);
    dom::serialize_document(&dom)
}

fn process_group(dom: &RcDom, group_root: &Handle, group_index: usize, opts: &Options) {
    let markers = collect_markers(group_root, opts);
    if markers.is_empty() {
        return;
    }

    let mut dest: Option<Handle> = None;

    for (marker_index, marker) in markers.iter().enumerate() {
        let dest = dest
            .get_or_insert_with(|| destination::resolve(dom, group_root, group_index, opts))
            .clone();

        let Some(payload) = opts.extractor.extract(marker) else {
            warn!("no extraction rule applied to marker {marker_index} in group {group_index}");
            continue;
        };

        match dedupe::find_match(&payload, &dest) {
            None => {
                let ref_id = format!("{group_index}-{marker_index}");
                links::create_entry(&ref_id, payload, &dest, marker, opts);
            }
            Some((entry_index, entry)) => {
                links::add_instance(&payload, &entry, group_index, entry_index, marker, opts);
            }
        }
    }
}

/// The group's markers in document order.
///
/// The ordered handle list is computed once before any mutation, so the
/// selection criteria cannot re-match nodes the pass itself produces.
/// Already-consumed markers and content that was consolidated in an earlier
/// pass are skipped, which makes re-running over a processed group a no-op.
fn collect_markers(group_root: &Handle, opts: &Options) -> Vec<Handle> {
    let mut markers = Vec::new();
    dom::walk(group_root, &mut |node| {
        if opts.markers.matches(node) && !is_consumed(node) && !in_consolidated_content(node) {
            markers.push(node.clone());
        }
    });
    markers
}

/// A marker that already carries its forward reference is consumed: the
/// generated `<sup>` holding an `a.footnoteLink` sits as the marker's first
/// child (prepend targets) or as its immediately following sibling.
fn is_consumed(marker: &Handle) -> bool {
    let first_child = marker.children.borrow().first().cloned();
    if let Some(child) = first_child {
        if is_forward_reference(&child) {
            return true;
        }
    }
    match dom::next_sibling(marker) {
        Some(sibling) => is_forward_reference(&sibling),
        None => false,
    }
}

fn is_forward_reference(node: &Handle) -> bool {
    dom::is_tag(node, "sup")
        && node
            .children
            .borrow()
            .iter()
            .any(|c| dom::is_tag(c, "a") && dom::has_class(c, "footnoteLink"))
}

/// Content already relocated into an entry lives under a
/// `span.footnoteContent`; nothing inside one is a marker source.
fn in_consolidated_content(node: &Handle) -> bool {
    let mut current = dom::parent(node);
    while let Some(ancestor) = current {
        if dom::is_tag(&ancestor, "span") && dom::has_class(&ancestor, "footnoteContent") {
            return true;
        }
        current = dom::parent(&ancestor);
    }
    false
}
