#![forbid(unsafe_code)]

//! Widgets: the modal overlay, its focus manager, and the simple styled
//! components that share the validation policy.
//!
//! # Role in LDS
//! `lds-widgets` holds the stateful parts of the toolkit. Every widget
//! renders into an [`lds_core::dom::Document`] under a host element it is
//! given; none of them own the document.
//!
//! # Primary responsibilities
//! - **Focus**: focusable-set computation, Tab cycling, focus save/restore.
//! - **Modal**: the open/closed state machine, dismissal rules, rendering.
//! - **Validate**: warn-and-default policy for enumerated style properties.
//! - **Badge / Button / Card / Input**: declarative renderers.

pub mod badge;
pub mod button;
pub mod card;
pub mod focus;
pub mod input;
pub mod modal;
mod shadow;
pub mod validate;

use lds_core::dom::{Document, ElementId};

/// A component that renders itself under a host element.
///
/// `render` replaces the host's previous rendering. The host's own children
/// are projected into the rendering's content regions.
pub trait Widget {
    fn render(&self, host: ElementId, doc: &mut Document);
}
