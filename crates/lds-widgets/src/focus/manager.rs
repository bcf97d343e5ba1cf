#![forbid(unsafe_code)]

//! Focus manager: cyclic traversal, initial focus, and a single-slot
//! save/restore of focus held outside a container.
//!
//! The manager has no knowledge of overlays. Every operation takes the
//! document and the container explicitly; the only state it keeps is the
//! [`FocusSnapshot`] slot.
//!
//! # Invariants
//!
//! 1. **Trap closure**: `cycle` only ever focuses members of
//!    `enumerate_focusable(container)`, so repeated Tab presses never leave
//!    the container.
//! 2. **Single slot**: `save` overwrites any unconsumed snapshot; `restore`
//!    always clears it.
//! 3. **Detached targets**: `restore` never focuses an element that is no
//!    longer connected to the document.
//!
//! # Failure Modes
//!
//! - Nested containers sharing one manager overwrite each other's snapshot.
//!   There is no stack.
//! - An empty focusable set turns `cycle` into a no-op; focus stays put.

use lds_core::dom::{Document, ElementId};
use lds_core::selector::Selector;

use super::focusable::enumerate_focusable;

/// Direction for [`FocusManager::cycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusDirection {
    /// Tab.
    Forward,
    /// Shift+Tab.
    Backward,
}

/// The element that held focus immediately before a container took over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusSnapshot {
    pub element: ElementId,
}

/// Focus service composed into components that trap focus.
#[derive(Debug, Default)]
pub struct FocusManager {
    snapshot: Option<FocusSnapshot>,
}

impl FocusManager {
    /// Create a manager with an empty snapshot slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Focusable descendants of `container` in document order.
    #[must_use]
    pub fn enumerate_focusable(&self, doc: &Document, container: ElementId) -> Vec<ElementId> {
        enumerate_focusable(doc, container)
    }

    /// Move focus to the next/previous member of the focusable set, wrapping
    /// at either end.
    ///
    /// When the active element is outside the set the current index is
    /// treated as `-1`: Forward lands on the first member and Backward on the
    /// last (an outside focus has no "previous" neighbour, so it wraps).
    /// Returns `false` without touching focus when the set is empty.
    pub fn cycle(
        &self,
        doc: &mut Document,
        container: ElementId,
        direction: FocusDirection,
    ) -> bool {
        let order = enumerate_focusable(doc, container);
        if order.is_empty() {
            return false;
        }

        let len = order.len() as isize;
        let index = doc
            .active_element()
            .and_then(|active| order.iter().position(|id| *id == active))
            .map_or(-1, |pos| pos as isize);
        let next = match direction {
            FocusDirection::Forward => (index + 1).rem_euclid(len),
            FocusDirection::Backward if index <= 0 => len - 1,
            FocusDirection::Backward => index - 1,
        };
        let next = next as usize;

        let target = order[next];
        tracing::trace!(
            message = "focus.cycle",
            ?direction,
            from = index,
            to = next,
            len = order.len()
        );
        doc.focus(target)
    }

    /// Focus the preferred element, or else the first focusable one.
    ///
    /// `preferred` is matched against `container` itself and its descendants,
    /// so a selector naming the container is a safe fallback target even
    /// when nothing inside it is interactive. Returns whether focus moved.
    pub fn set_initial_focus(
        &self,
        doc: &mut Document,
        container: ElementId,
        preferred: Option<&Selector>,
    ) -> bool {
        if let Some(selector) = preferred
            && let Some(target) = doc.query_selector(container, selector)
        {
            return doc.focus(target);
        }
        match enumerate_focusable(doc, container).first() {
            Some(&first) => doc.focus(first),
            None => false,
        }
    }

    /// Record the element that currently holds focus.
    ///
    /// Overwrites any snapshot not yet consumed by [`restore`](Self::restore).
    pub fn save(&mut self, doc: &Document) {
        if let Some(prev) = self.snapshot {
            tracing::debug!(
                message = "focus.save.overwrite",
                discarded = prev.element.index()
            );
        }
        self.snapshot = doc
            .active_element()
            .map(|element| FocusSnapshot { element });
    }

    /// Return focus to the saved element if it is still attached.
    ///
    /// The snapshot is cleared whether or not focus could be restored.
    pub fn restore(&mut self, doc: &mut Document) -> bool {
        let Some(snapshot) = self.snapshot.take() else {
            return false;
        };
        if !doc.is_connected(snapshot.element) {
            tracing::debug!(
                message = "focus.restore.detached",
                element = snapshot.element.index()
            );
            return false;
        }
        let restored = doc.focus(snapshot.element);
        tracing::debug!(
            message = "focus.restore",
            element = snapshot.element.index(),
            restored
        );
        restored
    }

    /// Current snapshot, if one is pending.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Option<FocusSnapshot> {
        self.snapshot
    }

    /// Drop the snapshot without restoring it.
    pub fn discard(&mut self) {
        self.snapshot = None;
    }
}
