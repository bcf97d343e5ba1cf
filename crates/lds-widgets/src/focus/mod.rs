#![forbid(unsafe_code)]

//! Focus management: focusable-set computation, cyclic traversal, and
//! save/restore of focus anchored outside a container.

pub mod focusable;
pub mod manager;

pub use focusable::{enumerate_focusable, is_tabbable};
pub use manager::{FocusDirection, FocusManager, FocusSnapshot};
