#![forbid(unsafe_code)]

//! Overlay controller: the open/closed state machine behind `lds-modal`.
//!
//! The controller owns an [`OverlayState`], composes one [`FocusManager`],
//! and renders a backdrop plus dialog panel under its host element while
//! open.
//!
//! # Lifecycle
//!
//! ```text
//! request_open ─► save focus, flip to Open, schedule initial focus
//!      │
//!  commit ──────► render backdrop + panel, then run the initial focus
//!      │
//!  Tab / Shift+Tab inside panel ─► cycle focus within the panel
//!      │
//!  Escape / backdrop click / request_close ─► close(reason)
//!      │
//!  close ───────► flip to Closed, cancel pending focus, restore focus,
//!                 tear down the rendering, release leftover focus,
//!                 notify listeners
//! ```
//!
//! # Invariants
//!
//! 1. **Idempotence**: opening an open overlay or closing a closed one has no
//!    side effects and produces no notification.
//! 2. **Single exit**: every dismissal goes through `close`, so listeners
//!    always observe focus already restored and the rendering gone.
//! 3. **One pending focus**: at most one initial-focus request is pending;
//!    a later open replaces it and any close cancels it.
//! 4. **Closed renders nothing**: no backdrop, no panel, no `open`
//!    attribute on the host.
//! 5. **Closed holds no focus**: after close or destroy the active element
//!    is outside the host, or nothing is focused.
//!
//! # Failure Modes
//!
//! - Overlays closed out of order restore stale targets: each controller
//!   remembers a single element and knows nothing of the others.
//! - An empty panel traps nothing: Tab falls through to the host's default
//!   handling.

use std::fmt;

use lds_core::dom::{Document, ElementId, Tag};
use lds_core::event::{DomEvent, Event, KeyCode};
use lds_core::ids::unique_dom_id;

use super::config::{InitialFocus, OverlayConfig};
use super::state::{DismissReason, Dismissal, OverlayState};
use crate::focus::{FocusDirection, FocusManager};
use crate::shadow;

/// Class of the full-viewport backdrop element.
pub const BACKDROP_CLASS: &str = "lds-modal-backdrop";
/// Class of the dialog panel.
pub const PANEL_CLASS: &str = "lds-modal-panel";
/// Class of the heading element.
pub const TITLE_CLASS: &str = "lds-modal-title";
/// Class of the body region (default slot).
pub const BODY_CLASS: &str = "lds-modal-body";
/// Class of the footer region.
pub const FOOTER_CLASS: &str = "lds-modal-footer";
/// Slot name routing host children into the footer.
pub const FOOTER_SLOT: &str = "footer";

/// Handle returned by [`OverlayController::add_dismiss_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type DismissListener = Box<dyn FnMut(&Dismissal)>;

/// Elements of the current rendering.
#[derive(Debug, Clone, Copy)]
struct Parts {
    backdrop: ElementId,
    panel: ElementId,
    title: Option<ElementId>,
    body: ElementId,
    body_slot: ElementId,
    footer_slot: ElementId,
}

/// The modal overlay entity.
pub struct OverlayController {
    host: ElementId,
    state: OverlayState,
    initial_focus: InitialFocus,
    focus: FocusManager,
    heading_id: String,
    parts: Option<Parts>,
    needs_render: bool,
    /// Generation of the open whose initial focus has not run yet.
    pending_focus: Option<u64>,
    generation: u64,
    listeners: Vec<(ListenerId, DismissListener)>,
    next_listener: u64,
}

impl fmt::Debug for OverlayController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayController")
            .field("host", &self.host)
            .field("state", &self.state)
            .field("initial_focus", &self.initial_focus)
            .field("pending_focus", &self.pending_focus)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl OverlayController {
    /// Create a closed overlay rendering under `host`.
    #[must_use]
    pub fn new(host: ElementId, config: OverlayConfig) -> Self {
        Self {
            host,
            state: OverlayState {
                is_open: false,
                dismiss_on_backdrop: config.dismiss_on_backdrop,
                dismiss_on_escape: config.dismiss_on_escape,
                heading: config.heading,
            },
            initial_focus: config.initial_focus,
            focus: FocusManager::new(),
            heading_id: unique_dom_id("lds-modal-title"),
            parts: None,
            needs_render: false,
            pending_focus: None,
            generation: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn host(&self) -> ElementId {
        self.host
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// Id given to the heading element, stable for this controller.
    #[must_use]
    pub fn heading_id(&self) -> &str {
        &self.heading_id
    }

    pub fn set_dismiss_on_backdrop(&mut self, on: bool) {
        self.state.dismiss_on_backdrop = on;
    }

    pub fn set_dismiss_on_escape(&mut self, on: bool) {
        self.state.dismiss_on_escape = on;
    }

    /// Change the heading; takes effect on the next render.
    pub fn set_heading(&mut self, heading: impl Into<String>) {
        let heading = heading.into();
        if heading != self.state.heading {
            self.state.heading = heading;
            self.needs_render |= self.state.is_open;
        }
    }

    /// Initial focus target used by later opens.
    pub fn set_initial_focus(&mut self, target: InitialFocus) {
        self.initial_focus = target;
    }

    /// Drive the `is_open` property. Closing this way is programmatic.
    pub fn set_open(&mut self, doc: &mut Document, open: bool) -> Option<Dismissal> {
        if open {
            self.request_open(doc);
            None
        } else {
            self.request_close(doc)
        }
    }

    /// Open the overlay.
    ///
    /// Saves the focused element, flips to Open, and schedules the initial
    /// focus for after the next commit. Returns `false` when already open.
    pub fn request_open(&mut self, doc: &mut Document) -> bool {
        if self.state.is_open {
            tracing::trace!(message = "overlay.open.ignored", host = self.host.index());
            return false;
        }
        self.focus.save(doc);
        self.state.is_open = true;
        self.generation += 1;
        self.pending_focus = Some(self.generation);
        self.needs_render = true;
        tracing::debug!(
            message = "overlay.open",
            host = self.host.index(),
            generation = self.generation,
            saved = ?self.focus.snapshot().map(|s| s.element.index())
        );
        true
    }

    /// Close the overlay programmatically.
    pub fn request_close(&mut self, doc: &mut Document) -> Option<Dismissal> {
        self.close(doc, DismissReason::Programmatic)
    }

    /// Route an event dispatched inside the host.
    ///
    /// Returns the dismissal when the event closed the overlay. Marks the
    /// event when it was consumed: Escape stops propagation, a trapped Tab
    /// prevents the default action.
    pub fn handle_event(
        &mut self,
        doc: &mut Document,
        event: &mut DomEvent,
    ) -> Option<Dismissal> {
        if !self.state.is_open {
            return None;
        }
        let parts = self.parts?;

        match event.event {
            Event::Key(key) => {
                if !key.is_press() || !doc.contains(parts.panel, event.target) {
                    return None;
                }
                match key.code {
                    KeyCode::Escape if self.state.dismiss_on_escape => {
                        event.stop_propagation();
                        self.close(doc, DismissReason::Escape)
                    }
                    KeyCode::Tab | KeyCode::BackTab => {
                        let direction = if key.code == KeyCode::BackTab || key.shift() {
                            FocusDirection::Backward
                        } else {
                            FocusDirection::Forward
                        };
                        if self.focus.cycle(doc, parts.panel, direction) {
                            event.prevent_default();
                        }
                        None
                    }
                    _ => None,
                }
            }
            Event::Pointer(pointer) => {
                if pointer.is_activation()
                    && event.target == parts.backdrop
                    && self.state.dismiss_on_backdrop
                {
                    self.close(doc, DismissReason::Backdrop)
                } else {
                    None
                }
            }
        }
    }

    /// The single exit path for every dismissal.
    fn close(&mut self, doc: &mut Document, reason: DismissReason) -> Option<Dismissal> {
        if !self.state.is_open {
            tracing::trace!(
                message = "overlay.close.ignored",
                host = self.host.index(),
                reason = reason.as_str()
            );
            return None;
        }
        self.state.is_open = false;
        self.pending_focus = None;
        let restored = self.focus.restore(doc);
        self.render(doc);
        if !restored {
            self.release_focus(doc);
        }

        let dismissal = Dismissal { reason };
        tracing::debug!(
            message = "overlay.dismiss",
            host = self.host.index(),
            reason = reason.as_str(),
            restored
        );
        for (_, listener) in &mut self.listeners {
            listener(&dismissal);
        }
        Some(dismissal)
    }

    /// Drop focus still held by content of the torn-down overlay.
    ///
    /// Projected children return to the host connected, so a focused slotted
    /// element would otherwise keep focus after close.
    fn release_focus(&self, doc: &mut Document) {
        if let Some(active) = doc.active_element()
            && doc.contains(self.host, active)
        {
            doc.blur();
            tracing::trace!(
                message = "overlay.focus.released",
                host = self.host.index(),
                element = active.index()
            );
        }
    }

    /// Whether state changed since the last render.
    #[inline]
    #[must_use]
    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Bring the rendering under the host in line with the state.
    pub fn render(&mut self, doc: &mut Document) {
        self.needs_render = false;
        if !self.state.is_open {
            self.parts = None;
            shadow::teardown(doc, self.host);
            doc.toggle_attr(self.host, "open", false);
            return;
        }

        doc.toggle_attr(self.host, "open", true);
        let mut parts = match self.parts {
            Some(parts) if doc.contains(self.host, parts.backdrop) => parts,
            _ => self.build(doc),
        };
        self.sync_heading(doc, &mut parts);
        shadow::project(doc, self.host, &[parts.body_slot, parts.footer_slot]);
        self.parts = Some(parts);
    }

    fn build(&self, doc: &mut Document) -> Parts {
        shadow::teardown(doc, self.host);

        let backdrop = shadow::render_root(doc, self.host, Tag::Div);
        doc.set_attr(backdrop, "class", BACKDROP_CLASS);

        let panel = doc.append_new(backdrop, Tag::Div);
        doc.set_attr(panel, "class", PANEL_CLASS);
        doc.set_attr(panel, "role", "dialog");
        doc.set_attr(panel, "aria-modal", "true");
        doc.set_attr(panel, "tabindex", "-1");

        let body = doc.append_new(panel, Tag::Div);
        doc.set_attr(body, "class", BODY_CLASS);
        let body_slot = shadow::slot(doc, body, None);

        let footer = doc.append_new(panel, Tag::Div);
        doc.set_attr(footer, "class", FOOTER_CLASS);
        let footer_slot = shadow::slot(doc, footer, Some(FOOTER_SLOT));

        Parts {
            backdrop,
            panel,
            title: None,
            body,
            body_slot,
            footer_slot,
        }
    }

    fn sync_heading(&self, doc: &mut Document, parts: &mut Parts) {
        if !self.state.has_heading() {
            if let Some(title) = parts.title.take() {
                doc.remove(title);
            }
            doc.remove_attr(parts.panel, "aria-labelledby");
            return;
        }

        let title = match parts.title {
            Some(title) => title,
            None => {
                let title = doc.create(Tag::Heading(2));
                doc.set_attr(title, "id", self.heading_id.as_str());
                doc.set_attr(title, "class", TITLE_CLASS);
                doc.insert_before(parts.panel, title, parts.body);
                parts.title = Some(title);
                title
            }
        };
        doc.set_text(title, self.state.heading.as_str());
        doc.set_attr(parts.panel, "aria-labelledby", self.heading_id.as_str());
    }

    /// Run the pending initial focus now that a render has committed.
    ///
    /// Focuses the configured target, else the first focusable element of
    /// the panel, else the panel itself. Leaves the request pending when the
    /// panel has not been rendered yet. Returns whether focus moved.
    pub fn after_commit(&mut self, doc: &mut Document) -> bool {
        let Some(generation) = self.pending_focus else {
            return false;
        };
        let Some(parts) = self.parts.filter(|p| doc.is_connected(p.panel)) else {
            return false;
        };
        self.pending_focus = None;

        let preferred = self.initial_focus.preferred_selector();
        let moved = self
            .focus
            .set_initial_focus(doc, parts.panel, preferred.as_ref())
            || doc.focus(parts.panel);
        tracing::trace!(
            message = "overlay.initial_focus",
            generation,
            moved,
            active = ?doc.active_element().map(ElementId::index)
        );
        moved
    }

    /// Render, then run any pending initial focus.
    pub fn commit(&mut self, doc: &mut Document) -> bool {
        self.render(doc);
        self.after_commit(doc)
    }

    #[inline]
    #[must_use]
    pub fn has_pending_initial_focus(&self) -> bool {
        self.pending_focus.is_some()
    }

    /// Rendered panel, while open and rendered.
    #[must_use]
    pub fn panel(&self) -> Option<ElementId> {
        self.parts.map(|p| p.panel)
    }

    /// Rendered backdrop, while open and rendered.
    #[must_use]
    pub fn backdrop(&self) -> Option<ElementId> {
        self.parts.map(|p| p.backdrop)
    }

    /// Rendered heading element, when a heading is set.
    #[must_use]
    pub fn heading_element(&self) -> Option<ElementId> {
        self.parts.and_then(|p| p.title)
    }

    /// Register a callback invoked with every dismissal.
    pub fn add_dismiss_listener(
        &mut self,
        listener: impl FnMut(&Dismissal) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a callback. Returns whether it was registered.
    pub fn remove_dismiss_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Dispose of the overlay without restoring focus or notifying.
    pub fn destroy(mut self, doc: &mut Document) {
        self.pending_focus = None;
        self.focus.discard();
        shadow::teardown(doc, self.host);
        doc.toggle_attr(self.host, "open", false);
        self.release_focus(doc);
        tracing::debug!(
            message = "overlay.destroy",
            host = self.host.index(),
            was_open = self.state.is_open
        );
    }
}
