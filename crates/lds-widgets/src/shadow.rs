#![forbid(unsafe_code)]

//! Rendered-subtree bookkeeping shared by every widget.
//!
//! A widget's rendering lives under its host element next to the host's own
//! (light) children. Rendered roots carry the [`SHADOW_ATTR`] marker so they
//! can be told apart. Light children are projected into `slot` elements of
//! the rendering and handed back to the host when the rendering is torn down.

use lds_core::dom::{Document, ElementId, Tag};

/// Marker attribute on the root of a rendered subtree.
pub(crate) const SHADOW_ATTR: &str = "data-lds-shadow";

/// Create a marked rendering root under `host`.
pub(crate) fn render_root(doc: &mut Document, host: ElementId, tag: Tag) -> ElementId {
    let root = doc.append_new(host, tag);
    doc.set_attr(root, SHADOW_ATTR, "");
    root
}

/// Create a `slot` under `parent`; `None` is the default region.
pub(crate) fn slot(doc: &mut Document, parent: ElementId, name: Option<&str>) -> ElementId {
    let slot = doc.append_new(parent, Tag::Slot);
    if let Some(name) = name {
        doc.set_attr(slot, "name", name);
    }
    slot
}

/// Host children that are not part of a rendering.
pub(crate) fn light_children(doc: &Document, host: ElementId) -> Vec<ElementId> {
    doc.children(host)
        .iter()
        .copied()
        .filter(|c| doc.attr(*c, SHADOW_ATTR).is_none())
        .collect()
}

/// Move light children of `host` into the slot whose name matches their
/// `slot` attribute. Children naming an unknown region stay on the host.
pub(crate) fn project(doc: &mut Document, host: ElementId, slots: &[ElementId]) {
    for child in light_children(doc, host) {
        let wanted = doc.attr(child, "slot").filter(|s| !s.is_empty());
        let target = slots
            .iter()
            .copied()
            .find(|slot| doc.attr(*slot, "name").filter(|s| !s.is_empty()) == wanted);
        if let Some(slot) = target {
            doc.append(slot, child);
        }
    }
}

/// Slots belonging to the rendering under `root`, not descending into
/// projected content.
fn own_slots(doc: &Document, root: ElementId) -> Vec<ElementId> {
    let mut found = Vec::new();
    let mut stack: Vec<ElementId> = doc.children(root).iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        if doc.get(id).is_some_and(|el| *el.tag() == Tag::Slot) {
            found.push(id);
            continue;
        }
        stack.extend(doc.children(id).iter().rev().copied());
    }
    found
}

/// Remove every rendering under `host`, returning projected content to it.
///
/// Returns whether anything was torn down.
pub(crate) fn teardown(doc: &mut Document, host: ElementId) -> bool {
    let roots: Vec<ElementId> = doc
        .children(host)
        .iter()
        .copied()
        .filter(|c| doc.attr(*c, SHADOW_ATTR).is_some())
        .collect();
    for root in &roots {
        for slot in own_slots(doc, *root) {
            for child in doc.children(slot).to_vec() {
                doc.append(host, child);
            }
        }
        doc.remove(*root);
    }
    !roots.is_empty()
}
