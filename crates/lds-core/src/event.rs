#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! This module defines the input events that components receive from the
//! hosting environment. Every event is delivered wrapped in a [`DomEvent`],
//! which names the element the event was dispatched at and carries the
//! dispatch flags (`prevent_default`, `stop_propagation`) a handler may set.
//!
//! # Design Notes
//!
//! - `KeyEventKind` defaults to `Press` when the host cannot distinguish
//! - `Modifiers` use bitflags for easy combination
//! - Pointer events carry no coordinates: the target element already
//!   identifies what was hit

use bitflags::bitflags;

use crate::dom::ElementId;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer (mouse, pen, touch) event.
    Pointer(PointerEvent),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt modifier is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// True for press and auto-repeat events, false for releases.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Shift+Tab reported as a single key by some hosts.
    BackTab,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// Which button triggered the event.
    pub button: PointerButton,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a new pointer event with no modifiers.
    #[must_use]
    pub const fn new(kind: PointerEventKind, button: PointerButton) -> Self {
        Self {
            kind,
            button,
            modifiers: Modifiers::NONE,
        }
    }

    /// A primary-button click, the usual "activation" gesture.
    #[must_use]
    pub const fn click() -> Self {
        Self::new(PointerEventKind::Click, PointerButton::Primary)
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether this event activates its target (primary-button click).
    #[must_use]
    pub const fn is_activation(&self) -> bool {
        matches!(
            (self.kind, self.button),
            (PointerEventKind::Click, PointerButton::Primary)
        )
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button pressed down.
    Down,

    /// Button released.
    Up,

    /// Press and release on the same element.
    Click,
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary (usually left) button.
    Primary,

    /// Secondary (usually right) button.
    Secondary,

    /// Middle button (scroll wheel click).
    Middle,
}

/// An event in flight, addressed to a target element.
///
/// Handlers inspect `event` and `target`, and may suppress the host's
/// default action or stop the event from reaching outer listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    /// The input event being dispatched.
    pub event: Event,

    /// The innermost element the event was dispatched at.
    pub target: ElementId,

    default_prevented: bool,
    propagation_stopped: bool,
}

impl DomEvent {
    /// Wrap an event for dispatch at `target`.
    #[must_use]
    pub fn new(event: Event, target: ElementId) -> Self {
        Self {
            event,
            target,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Dispatch a key event at `target`.
    #[must_use]
    pub fn key(key: KeyEvent, target: ElementId) -> Self {
        Self::new(Event::Key(key), target)
    }

    /// Dispatch a pointer event at `target`.
    #[must_use]
    pub fn pointer(pointer: PointerEvent, target: ElementId) -> Self {
        Self::new(Event::Pointer(pointer), target)
    }

    /// Suppress the host's default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop the event from reaching listeners outside the current handler.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether a handler suppressed the default action.
    #[must_use]
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether a handler stopped propagation.
    #[must_use]
    pub const fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// The key event, if this is a keyboard event.
    #[must_use]
    pub fn as_key(&self) -> Option<&KeyEvent> {
        match &self.event {
            Event::Key(key) => Some(key),
            Event::Pointer(_) => None,
        }
    }

    /// The pointer event, if this is a pointer event.
    #[must_use]
    pub fn as_pointer(&self) -> Option<&PointerEvent> {
        match &self.event {
            Event::Pointer(pointer) => Some(pointer),
            Event::Key(_) => None,
        }
    }
}
