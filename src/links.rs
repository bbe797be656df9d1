//! Link building
//!
//! Builds the forward reference at each marker site and the back-reference
//! bookkeeping inside each entry. First occurrences create an entry with a
//! single `^` back-reference; repeat occurrences convert the entry to the
//! letter-suffixed scheme (`a`, `b`, `c`, …) with one back-reference link
//! per referencing site.

use crate::dom;
use crate::extract::Payload;
use crate::options::Options;
use markup5ever_rcdom::Handle;
use tracing::{error, warn};

/// First occurrence: build the forward reference, the entry, and its sole
/// back-reference, and append the entry to the destination.
pub fn create_entry(
    ref_id: &str,
    payload: Payload,
    destination: &Handle,
    marker: &Handle,
    opts: &Options,
) {
    let ordinal = count_list_items(destination) + 1;

    let anchor = dom::create_element(
        "a",
        &[
            ("href", &format!("#cite-text-{ref_id}")),
            ("name", &format!("cite-ref-{ref_id}")),
            ("id", &format!("cite-ref-{ref_id}")),
            ("dir", "ltr"),
            ("title", &payload.text()),
            ("class", "footnoteLink"),
        ],
    );
    dom::append(&anchor, dom::create_text(&format!("[{ordinal}]")));
    place_forward_reference(anchor, marker, opts);

    let entry = dom::create_element("li", &[("id", &format!("cite-text-{ref_id}"))]);

    let group = dom::create_element("span", &[("class", "footnoteBackReferenceGroup")]);
    dom::append(&entry, group.clone());

    let content = dom::create_element("span", &[("class", "footnoteContent")]);
    for node in payload.into_nodes() {
        dom::append(&content, node);
    }
    dom::append(&entry, content);

    let backref = dom::create_element(
        "a",
        &[
            ("href", &format!("#cite-ref-{ref_id}")),
            ("class", "footnoteBackref"),
        ],
    );
    dom::append(&backref, dom::create_text("^"));
    dom::prepend(&group, backref);

    dom::append(destination, entry);
}

/// Repeat occurrence: add a forward reference at the marker and a lettered
/// back-reference to the existing entry. The duplicate payload is only used
/// for the link title; its fragment is discarded since the canonical content
/// already lives in the entry.
pub fn add_instance(
    payload: &Payload,
    entry: &Handle,
    group_index: usize,
    entry_index: usize,
    marker: &Handle,
    opts: &Options,
) {
    let Some(group) = backref_group(entry) else {
        error!("entry without a back-reference group; leaving entry untouched");
        return;
    };
    let backrefs = backref_links(&group);
    if backrefs.is_empty() {
        // A group always gets its ^ link at creation; finding none means the
        // tree was mangled after the fact. Degrade this entry only.
        error!("back-reference group with zero links; leaving entry untouched");
        return;
    }

    if backrefs.len() == 1 {
        // First repeat: relabel the sole ^ link to "a" and keep the visual
        // cue as an unlinked ^ ahead of it.
        let sole = &backrefs[0];
        dom::take_children(sole);
        let letter = dom::create_element("sup", &[]);
        dom::append(&letter, dom::create_text("a"));
        dom::append(sole, letter);

        let cue = dom::create_element("sup", &[("class", "footnoteBackref")]);
        dom::append(&cue, dom::create_text("^ "));
        dom::prepend(&group, cue);
    }

    let occurrence = backrefs.len();
    if occurrence >= 26 {
        warn!("more than 26 references to one footnote; letter labels leave the alphabet");
    }

    let entry_id = dom::get_attr(entry, "id").unwrap_or_default();
    let ref_id = format!("cite-ref-{group_index}-{entry_index}-{occurrence}");

    let anchor = dom::create_element(
        "a",
        &[
            ("href", &format!("#{entry_id}")),
            ("name", &ref_id),
            ("id", &ref_id),
            ("title", &payload.text()),
            ("class", "footnoteLink"),
        ],
    );
    dom::append(&anchor, dom::create_text(&format!("[{}]", entry_index + 1)));
    place_forward_reference(anchor, marker, opts);

    let backref = dom::create_element(
        "a",
        &[("href", &format!("#{ref_id}")), ("class", "footnoteBackref")],
    );
    // Past `z` this walks into symbol range; the formula is kept as-is.
    let letter = char::from_u32(96 + occurrence as u32 + 1).unwrap_or(char::REPLACEMENT_CHARACTER);
    dom::append(&backref, dom::create_text(&letter.to_string()));
    let sup = dom::create_element("sup", &[]);
    dom::append(&sup, backref);
    dom::append(&group, sup);
}

/// Wrap the forward anchor in `<sup>` and attach it at the marker site,
/// prepended into the marker when it matches the prepend selectors.
fn place_forward_reference(anchor: Handle, marker: &Handle, opts: &Options) {
    let sup = dom::create_element("sup", &[]);
    dom::append(&sup, anchor);
    if opts.prepend.matches(marker) {
        dom::prepend(marker, sup);
    } else {
        dom::insert_after(marker, sup);
    }
}

fn count_list_items(destination: &Handle) -> usize {
    destination
        .children
        .borrow()
        .iter()
        .filter(|c| dom::is_tag(c, "li"))
        .count()
}

fn backref_group(entry: &Handle) -> Option<Handle> {
    entry
        .children
        .borrow()
        .iter()
        .find(|c| dom::is_tag(c, "span") && dom::has_class(c, "footnoteBackReferenceGroup"))
        .cloned()
}

/// Back-reference links under the group span. The unlinked `^` cue is a
/// `<sup>`, not an `<a>`, so it never counts as a link.
fn backref_links(group: &Handle) -> Vec<Handle> {
    let mut links = Vec::new();
    dom::walk(group, &mut |node| {
        if dom::is_tag(node, "a") && dom::has_class(node, "footnoteBackref") {
            links.push(node.clone());
        }
    });
    links
}
