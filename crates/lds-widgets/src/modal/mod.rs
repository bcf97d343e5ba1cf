#![forbid(unsafe_code)]

//! Modal overlay: state, configuration, and the controller.

pub mod config;
pub mod controller;
pub mod state;

#[cfg(feature = "config")]
pub use config::ConfigError;
pub use config::{InitialFocus, OverlayConfig};
pub use controller::{
    BACKDROP_CLASS, BODY_CLASS, FOOTER_CLASS, FOOTER_SLOT, ListenerId, OverlayController,
    PANEL_CLASS, TITLE_CLASS,
};
pub use state::{DismissReason, Dismissal, OverlayState};
