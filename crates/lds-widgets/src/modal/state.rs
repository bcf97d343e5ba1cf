#![forbid(unsafe_code)]

//! Overlay state and dismissal payloads.

use std::fmt;

/// Observable properties of an overlay.
///
/// Created closed, dismissible both ways, and without a heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayState {
    pub is_open: bool,
    pub dismiss_on_backdrop: bool,
    pub dismiss_on_escape: bool,
    /// Empty means no heading and no accessible label.
    pub heading: String,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            is_open: false,
            dismiss_on_backdrop: true,
            dismiss_on_escape: true,
            heading: String::new(),
        }
    }
}

impl OverlayState {
    #[inline]
    #[must_use]
    pub fn has_heading(&self) -> bool {
        !self.heading.is_empty()
    }
}

/// Why an overlay closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissReason {
    /// Pointer activation on the backdrop itself.
    Backdrop,
    /// Escape pressed inside the panel.
    Escape,
    /// `request_close` or `set_open(false)`.
    Programmatic,
}

impl DismissReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backdrop => "backdrop",
            Self::Escape => "escape",
            Self::Programmatic => "programmatic",
        }
    }
}

impl fmt::Display for DismissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification delivered to dismiss listeners on an Open to Closed
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dismissal {
    pub reason: DismissReason,
}
