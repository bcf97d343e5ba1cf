#![forbid(unsafe_code)]

//! LDS public facade crate.
//!
//! Re-exports the document model and widgets under one roof and offers a
//! prelude for day-to-day usage:
//!
//! ```
//! use lds::prelude::*;
//!
//! let mut doc = Document::new();
//! let opener = doc.append_new(doc.root(), Tag::Button);
//! let host = doc.append_new(doc.root(), Tag::Custom("lds-modal".into()));
//! let mut modal = OverlayController::new(host, OverlayConfig::new().heading("Hello"));
//!
//! doc.focus(opener);
//! modal.request_open(&mut doc);
//! modal.commit(&mut doc);
//! assert_eq!(doc.active_element(), modal.panel());
//!
//! modal.request_close(&mut doc);
//! assert_eq!(doc.active_element(), Some(opener));
//! ```

// --- Core re-exports -------------------------------------------------------

pub use lds_core::dom::{Document, Element, ElementId, FocusEvent, Tag};
pub use lds_core::event::{
    DomEvent, Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerButton, PointerEvent,
    PointerEventKind,
};
pub use lds_core::ids::unique_dom_id;
pub use lds_core::selector::{Selector, SelectorError};

// --- Widget re-exports -----------------------------------------------------

pub use lds_widgets::Widget;
pub use lds_widgets::badge::{Badge, BadgeVariant};
pub use lds_widgets::button::{Button, ButtonSize, ButtonVariant};
pub use lds_widgets::card::{Card, CardElevation, CardPadding};
pub use lds_widgets::focus::{FocusDirection, FocusManager, FocusSnapshot};
pub use lds_widgets::input::{Input, InputEvent, InputType};
#[cfg(feature = "config")]
pub use lds_widgets::modal::ConfigError;
pub use lds_widgets::modal::{
    DismissReason, Dismissal, InitialFocus, ListenerId, OverlayConfig, OverlayController,
    OverlayState,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for LDS.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A selector string could not be parsed.
    #[error(transparent)]
    Selector(#[from] SelectorError),
    /// Overlay configuration could not be loaded.
    #[cfg(feature = "config")]
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Standard result type for LDS APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse a selector, lifting the error into [`Error`].
pub fn selector(input: &str) -> Result<Selector> {
    Ok(Selector::parse(input)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Document, DomEvent, ElementId, Error, KeyCode, KeyEvent, OverlayConfig,
        OverlayController, PointerEvent, Result, Tag, Widget,
    };

    pub use crate::{core, widgets};
}

pub use lds_core as core;
pub use lds_widgets as widgets;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_errors_convert() {
        let err = selector("a b").expect_err("combinator");
        assert!(matches!(err, Error::Selector(SelectorError::Unsupported { found: ' ', .. })));
        assert!(selector("button.primary").is_ok());
    }

    #[test]
    fn prelude_drives_a_modal() {
        use crate::prelude::*;

        let mut doc = Document::new();
        let host = doc.append_new(doc.root(), Tag::Custom("lds-modal".into()));
        let ok = doc.append_new(host, Tag::Button);
        let mut modal = OverlayController::new(host, OverlayConfig::default());
        modal.request_open(&mut doc);
        modal.commit(&mut doc);
        assert_eq!(doc.active_element(), Some(ok));

        let mut esc = DomEvent::key(KeyEvent::new(KeyCode::Escape), ok);
        let dismissal = modal.handle_event(&mut doc, &mut esc);
        assert_eq!(dismissal.map(|d| d.reason), Some(DismissReason::Escape));
    }
}
