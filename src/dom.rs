//! RcDom node helpers
//!
//! Thin layer over `markup5ever_rcdom` used by every other module: node
//! construction, attribute and class access, tree mutation, document-order
//! traversal, and the HTML parse/serialize entry points. The document tree is
//! always an explicitly passed handle; nothing in this crate reaches for
//! ambient state.

use crate::error::FootnoteError;
use html5ever::tendril::TendrilSink;
use html5ever::{
    ns, parse_document, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute,
    LocalName, ParseOpts, QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::error;

/// Parse an HTML document into an RcDom tree.
pub fn parse_html(source: &str) -> Result<RcDom, FootnoteError> {
    let mut bytes = source.as_bytes();
    parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut bytes)
        .map_err(|e| FootnoteError::ParseError(format!("HTML parsing failed: {}", e)))
}

/// Parse an HTML fragment and return its top-level nodes.
///
/// The fragment is run through the document parser and the children of the
/// synthesized `<body>` are returned, which sidesteps fragment-context
/// bookkeeping for the small snippets this crate sees (title attributes).
pub fn parse_snippet(source: &str) -> Result<Vec<Handle>, FootnoteError> {
    let dom = parse_html(source)?;
    let body = find_tag(&dom.document, "body").ok_or_else(|| {
        FootnoteError::ParseError("parsed fragment has no body element".to_string())
    })?;
    let children = body.children.borrow().clone();
    for child in &children {
        child.parent.set(None);
    }
    body.children.borrow_mut().clear();
    Ok(children)
}

/// Serialize a whole document to an HTML string.
pub fn serialize_document(dom: &RcDom) -> Result<String, FootnoteError> {
    let mut output = Vec::new();
    let serializable = SerializableHandle::from(dom.document.clone());
    serialize(&mut output, &serializable, SerializeOpts::default()).map_err(|e| {
        FootnoteError::SerializationError(format!("HTML serialization failed: {}", e))
    })?;
    String::from_utf8(output)
        .map_err(|e| FootnoteError::SerializationError(format!("UTF-8 conversion failed: {}", e)))
}

/// Serialize a list of nodes to their markup.
///
/// Used for payload identity comparison; a serialization failure is a defect
/// signal, logged and degraded to an empty string rather than aborting the
/// pass.
pub fn serialize_nodes(nodes: &[Handle]) -> String {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    for node in nodes {
        let serializable = SerializableHandle::from(node.clone());
        if let Err(e) = serialize(&mut output, &serializable, opts.clone()) {
            error!("node serialization failed: {}", e);
            return String::new();
        }
    }
    String::from_utf8_lossy(&output).into_owned()
}

/// Create an HTML element with attributes
pub fn create_element(tag: &str, attrs: &[(&str, &str)]) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(*name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
pub fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

pub fn is_element(node: &Handle) -> bool {
    matches!(node.data, NodeData::Element { .. })
}

/// Whether the node is an element with the given (lowercase) tag name.
pub fn is_tag(node: &Handle, tag: &str) -> bool {
    match &node.data {
        NodeData::Element { name, .. } => &*name.local == tag,
        _ => false,
    }
}

pub fn is_text(node: &Handle) -> bool {
    matches!(node.data, NodeData::Text { .. })
}

/// Read an attribute value. `None` when the attribute is absent.
pub fn get_attr(node: &Handle, attr: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == attr)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Set an attribute, replacing an existing value.
pub fn set_attr(node: &Handle, attr: &str, value: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let mut attrs = attrs.borrow_mut();
        if let Some(existing) = attrs.iter_mut().find(|a| &*a.name.local == attr) {
            existing.value = value.to_string().into();
        } else {
            attrs.push(Attribute {
                name: QualName::new(None, ns!(), LocalName::from(attr)),
                value: value.to_string().into(),
            });
        }
    }
}

pub fn has_class(node: &Handle, class: &str) -> bool {
    get_attr(node, "class")
        .map(|v| v.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// Replace a text node's contents.
pub fn set_text(node: &Handle, text: &str) {
    if let NodeData::Text { contents } = &node.data {
        *contents.borrow_mut() = text.to_string().into();
    }
}

/// Concatenated text of the node and its descendants.
pub fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { .. } | NodeData::Document => {
            for child in node.children.borrow().iter() {
                collect_text(child, out);
            }
        }
        _ => {}
    }
}

pub fn parent(node: &Handle) -> Option<Handle> {
    // Cell<Option<Weak<_>>> has no borrow; take and restore.
    let weak = node.parent.take();
    let up = weak.as_ref().and_then(|w| w.upgrade());
    node.parent.set(weak);
    up
}

/// The node immediately following this one in its parent's child list.
pub fn next_sibling(node: &Handle) -> Option<Handle> {
    let parent = parent(node)?;
    let children = parent.children.borrow();
    let index = children.iter().position(|c| Rc::ptr_eq(c, node))?;
    children.get(index + 1).cloned()
}

pub fn append(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

pub fn prepend(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().insert(0, child);
}

/// Insert `new` as the sibling immediately after `node`.
///
/// A node with no parent cannot take a sibling; that is a defect signal
/// (markers always come out of a parsed tree), logged and skipped.
pub fn insert_after(node: &Handle, new: Handle) {
    let Some(parent) = parent(node) else {
        error!("cannot insert after a detached node");
        return;
    };
    let mut children = parent.children.borrow_mut();
    let Some(index) = children.iter().position(|c| Rc::ptr_eq(c, node)) else {
        error!("node not found among its parent's children");
        return;
    };
    new.parent.set(Some(Rc::downgrade(&parent)));
    children.insert(index + 1, new);
}

/// Detach and return all children of a node.
pub fn take_children(node: &Handle) -> Vec<Handle> {
    let children = std::mem::take(&mut *node.children.borrow_mut());
    for child in &children {
        child.parent.set(None);
    }
    children
}

/// Pre-order walk over the subtree rooted at `node`, including `node`.
pub fn walk(node: &Handle, visit: &mut dyn FnMut(&Handle)) {
    visit(node);
    let children = node.children.borrow().clone();
    for child in &children {
        walk(child, visit);
    }
}

/// First element in the subtree with the given id attribute.
pub fn find_by_id(root: &Handle, id: &str) -> Option<Handle> {
    let mut found = None;
    walk(root, &mut |node| {
        if found.is_none() && get_attr(node, "id").as_deref() == Some(id) {
            found = Some(node.clone());
        }
    });
    found
}

/// First element in the subtree with the given tag name.
pub fn find_tag(root: &Handle, tag: &str) -> Option<Handle> {
    let mut found = None;
    walk(root, &mut |node| {
        if found.is_none() && is_tag(node, tag) {
            found = Some(node.clone());
        }
    });
    found
}
