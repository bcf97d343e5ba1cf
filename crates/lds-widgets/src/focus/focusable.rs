#![forbid(unsafe_code)]

//! Focusable-set computation.
//!
//! The set is a view over the document, recomputed on every call and never
//! cached, so it always reflects the latest mutations.

use lds_core::dom::{Document, Element, ElementId};

/// Whether `element` belongs in the keyboard (Tab) sequence.
///
/// Members are not disabled, not `aria-hidden="true"`, and either natively
/// interactive or carrying a non-negative `tabindex`.
#[must_use]
pub fn is_tabbable(element: &Element) -> bool {
    if element.is_disabled() || element.is_aria_hidden() {
        return false;
    }
    element.is_natively_interactive() || element.tab_index().is_some_and(|t| t >= 0)
}

/// Focusable descendants of `container` in document order.
///
/// The container itself is never included. An empty result is valid.
#[must_use]
pub fn enumerate_focusable(doc: &Document, container: ElementId) -> Vec<ElementId> {
    doc.descendants(container)
        .filter(|id| doc.get(*id).is_some_and(is_tabbable))
        .collect()
}
