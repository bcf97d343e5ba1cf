#![forbid(unsafe_code)]

//! Arena-backed document tree with a single focus slot.
//!
//! A [`Document`] owns every [`Element`] ever created in it. Elements are
//! addressed by [`ElementId`] handles that are never reused, so a handle to
//! a removed subtree stays valid: it simply reports `is_connected() == false`.
//!
//! # Invariants
//!
//! 1. The root (`Tag::Body`) is always connected and has no parent.
//! 2. `children` and `parent` links are mutually consistent.
//! 3. The active element, when set, is connected. Detaching a subtree that
//!    contains the active element blurs it.
//! 4. Every focus change is recorded as a [`FocusEvent`].
//!
//! # Failure Modes
//!
//! - Handles from a different document that fall outside this arena are
//!   ignored by mutators and report `None`/`false` from queries.
//! - `append` refuses to create cycles (appending an ancestor under its own
//!   descendant is a no-op returning `false`).

use ahash::AHashMap;

use crate::selector::Selector;

/// Opaque handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    /// Arena index of this element.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Element kinds understood by the toolkit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Body,
    Div,
    Span,
    Paragraph,
    /// `h1`..`h6`.
    Heading(u8),
    Label,
    Button,
    Anchor,
    Input,
    Textarea,
    Select,
    /// Content region placeholder; `name` attribute selects the region.
    Slot,
    /// Any other element, e.g. a custom component host like `lds-modal`.
    Custom(String),
}

impl Tag {
    /// Tag name as it appears in markup.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Body => "body",
            Self::Div => "div",
            Self::Span => "span",
            Self::Paragraph => "p",
            Self::Heading(1) => "h1",
            Self::Heading(2) => "h2",
            Self::Heading(3) => "h3",
            Self::Heading(4) => "h4",
            Self::Heading(5) => "h5",
            Self::Heading(_) => "h6",
            Self::Label => "label",
            Self::Button => "button",
            Self::Anchor => "a",
            Self::Input => "input",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Slot => "slot",
            Self::Custom(name) => name,
        }
    }

    /// Parse a (case-insensitive) tag name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "body" => Self::Body,
            "div" => Self::Div,
            "span" => Self::Span,
            "p" => Self::Paragraph,
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "label" => Self::Label,
            "button" => Self::Button,
            "a" => Self::Anchor,
            "input" => Self::Input,
            "textarea" => Self::Textarea,
            "select" => Self::Select,
            "slot" => Self::Slot,
            _ => Self::Custom(lower),
        }
    }
}

/// A single node in the document tree.
#[derive(Debug, Clone)]
pub struct Element {
    tag: Tag,
    attrs: AHashMap<String, String>,
    text: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: AHashMap::new(),
            text: None,
            parent: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Attribute value, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// Iterate attributes in unspecified order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// The `id` attribute.
    #[must_use]
    pub fn dom_id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Parsed `tabindex`; `None` when absent or not an integer.
    #[must_use]
    pub fn tab_index(&self) -> Option<i32> {
        self.attr("tabindex")?.trim().parse().ok()
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.has_attr("disabled")
    }

    /// `aria-hidden="true"`.
    #[must_use]
    pub fn is_aria_hidden(&self) -> bool {
        self.attr("aria-hidden") == Some("true")
    }

    /// Links with a target, buttons, and form controls.
    #[must_use]
    pub fn is_natively_interactive(&self) -> bool {
        match self.tag {
            Tag::Button | Tag::Input | Tag::Textarea | Tag::Select => true,
            Tag::Anchor => self.has_attr("href"),
            _ => false,
        }
    }

    /// Whether `focus()` may move focus here (ignores connectedness).
    ///
    /// Any element carrying a `tabindex` is a programmatic focus target,
    /// including `tabindex="-1"`, which keeps it out of the Tab sequence only.
    #[must_use]
    pub fn is_focus_target(&self) -> bool {
        if self.is_disabled() && self.is_natively_interactive() {
            return false;
        }
        self.is_natively_interactive() || self.tab_index().is_some()
    }
}

/// Focus change events recorded by the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEvent {
    Gained { id: ElementId },
    Lost { id: ElementId },
    Moved { from: ElementId, to: ElementId },
}

/// The document tree plus the element that currently holds focus.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    root: ElementId,
    active: Option<ElementId>,
    last_event: Option<FocusEvent>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only the `body` root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new(Tag::Body)],
            root: ElementId(0),
            active: None,
            last_event: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> ElementId {
        self.root
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id.index())
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.nodes.get_mut(id.index())
    }

    /// Create a detached element.
    pub fn create(&mut self, tag: Tag) -> ElementId {
        let id = ElementId(self.nodes.len() as u32);
        self.nodes.push(Element::new(tag));
        id
    }

    /// Create an element and append it under `parent`.
    pub fn append_new(&mut self, parent: ElementId, tag: Tag) -> ElementId {
        let id = self.create(tag);
        self.append(parent, id);
        id
    }

    /// Move `child` (and its subtree) to the end of `parent`'s children.
    ///
    /// Returns `false` when either handle is unknown, `child` is the root, or
    /// the move would make an element its own ancestor.
    pub fn append(&mut self, parent: ElementId, child: ElementId) -> bool {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return false;
        }
        if child == self.root || self.contains(child, parent) {
            return false;
        }
        self.unlink(child);
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
        true
    }

    /// Move `child` under `parent`, placing it before `reference`.
    ///
    /// Falls back to appending when `reference` is not a child of `parent`.
    pub fn insert_before(
        &mut self,
        parent: ElementId,
        child: ElementId,
        reference: ElementId,
    ) -> bool {
        if !self.append(parent, child) {
            return false;
        }
        if let Some(node) = self.get_mut(parent)
            && let Some(at) = node.children.iter().position(|c| *c == reference)
        {
            node.children.pop();
            node.children.insert(at, child);
        }
        true
    }

    /// Detach `id` (and its subtree) from the tree.
    ///
    /// Blurs the active element if it lived in the removed subtree. The root
    /// cannot be removed.
    pub fn remove(&mut self, id: ElementId) {
        if id == self.root || self.get(id).is_none() {
            return;
        }
        if let Some(active) = self.active
            && self.contains(id, active)
        {
            self.blur();
        }
        self.unlink(id);
    }

    fn unlink(&mut self, id: ElementId) {
        let Some(parent) = self.get_mut(id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(node) = self.get_mut(parent) {
            node.children.retain(|c| *c != id);
        }
    }

    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).and_then(Element::parent)
    }

    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(Element::children).unwrap_or_default()
    }

    /// Pre-order (document order) traversal below `id`, excluding `id`.
    #[must_use]
    pub fn descendants(&self, id: ElementId) -> Descendants<'_> {
        let mut stack: Vec<ElementId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// Whether `id` is `ancestor` or lies somewhere below it.
    #[must_use]
    pub fn contains(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Whether `id` is reachable from the root.
    #[must_use]
    pub fn is_connected(&self, id: ElementId) -> bool {
        self.get(id).is_some() && self.contains(self.root, id)
    }

    pub fn set_attr(&mut self, id: ElementId, name: impl Into<String>, value: impl Into<String>) {
        if let Some(node) = self.get_mut(id) {
            node.attrs.insert(name.into(), value.into());
        }
    }

    /// Set or clear a boolean attribute (present with an empty value).
    pub fn toggle_attr(&mut self, id: ElementId, name: &str, on: bool) {
        if on {
            self.set_attr(id, name, "");
        } else {
            self.remove_attr(id, name);
        }
    }

    pub fn remove_attr(&mut self, id: ElementId, name: &str) {
        if let Some(node) = self.get_mut(id) {
            node.attrs.remove(name);
        }
    }

    #[must_use]
    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id).and_then(|n| n.attr(name))
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(node) = self.get_mut(id) {
            node.text = Some(text.into());
        }
    }

    /// First element matching `selector`, checking `scope` itself first.
    #[must_use]
    pub fn query_selector(&self, scope: ElementId, selector: &Selector) -> Option<ElementId> {
        std::iter::once(scope)
            .chain(self.descendants(scope))
            .find(|id| self.get(*id).is_some_and(|el| selector.matches(el)))
    }

    /// Connected element whose `id` attribute equals `dom_id`.
    #[must_use]
    pub fn element_by_dom_id(&self, dom_id: &str) -> Option<ElementId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|id| self.get(*id).and_then(Element::dom_id) == Some(dom_id))
    }

    /// Element that currently holds focus.
    #[inline]
    #[must_use]
    pub fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    /// Move focus to `id`.
    ///
    /// Returns `false` (leaving focus unchanged) when the element is detached
    /// or not a focus target.
    pub fn focus(&mut self, id: ElementId) -> bool {
        let focusable = self.get(id).is_some_and(Element::is_focus_target);
        if !focusable || !self.is_connected(id) {
            tracing::trace!(message = "dom.focus.rejected", index = id.index());
            return false;
        }
        if self.active == Some(id) {
            return true;
        }
        self.last_event = Some(match self.active {
            Some(from) => FocusEvent::Moved { from, to: id },
            None => FocusEvent::Gained { id },
        });
        self.active = Some(id);
        true
    }

    /// Drop focus, returning the element that held it.
    pub fn blur(&mut self) -> Option<ElementId> {
        let prev = self.active.take();
        if let Some(id) = prev {
            self.last_event = Some(FocusEvent::Lost { id });
        }
        prev
    }

    /// Last recorded focus event.
    #[must_use]
    pub fn focus_event(&self) -> Option<&FocusEvent> {
        self.last_event.as_ref()
    }

    /// Take and clear the last focus event.
    pub fn take_focus_event(&mut self) -> Option<FocusEvent> {
        self.last_event.take()
    }
}

/// Iterator returned by [`Document::descendants`].
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<ElementId>,
}

impl Iterator for Descendants<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}
