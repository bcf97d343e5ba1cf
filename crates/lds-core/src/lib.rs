#![forbid(unsafe_code)]

//! Core: document model, selectors, input events, and id allocation.
//!
//! # Role in LDS
//! `lds-core` is the environment layer. It models the hosting document that
//! components render into, the element that currently holds focus, and the
//! input events the host dispatches at elements.
//!
//! # Primary responsibilities
//! - **Document**: arena tree of elements with attribute maps and one focus slot.
//! - **Selector**: compound selectors for locating component parts.
//! - **Event**: keyboard and pointer events plus per-dispatch flags.
//! - **Ids**: process-wide unique ids for label associations.
//!
//! # How it fits in the system
//! `lds-widgets` renders components into a [`dom::Document`] and consumes
//! [`event::DomEvent`] values. Nothing here knows about overlays or focus
//! traps; those live one layer up.

pub mod dom;
pub mod event;
pub mod ids;
pub mod selector;
